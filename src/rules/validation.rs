use std::sync::LazyLock;

use indexmap::IndexMap;
use fancy_regex::Regex as PatternRegex;
use regex::Regex;
use tracing::debug;

use crate::domain::{FieldType, FieldValue, FormField, FormValues, coerce_number, format_number};

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("email regex is valid")
});

/// Result of running a compiled validator over a set of values.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid,
    /// First error message per failing field, in field order.
    Invalid { errors: IndexMap<String, String> },
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn error(&self, field_id: &str) -> Option<&str> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid { errors } => errors.get(field_id).map(String::as_str),
        }
    }
}

/// Executable form of every field's declarative rules.
#[derive(Debug, Clone)]
pub struct FormValidator {
    checks: Vec<FieldCheck>,
}

#[derive(Debug, Clone)]
struct FieldCheck {
    id: String,
    label: String,
    kind: CheckKind,
}

#[derive(Debug, Clone)]
enum CheckKind {
    Number {
        required: bool,
        min: Option<f64>,
        max: Option<f64>,
    },
    Checkbox {
        required: bool,
    },
    Email {
        required: bool,
    },
    Text {
        required: bool,
        min_length: Option<usize>,
        max_length: Option<usize>,
        pattern: Option<PatternRegex>,
    },
}

/// Build a validator for `fields`. Patterns that do not compile are skipped.
pub fn compile(fields: &[FormField]) -> FormValidator {
    let checks = fields
        .iter()
        .map(|field| FieldCheck {
            id: field.id.clone(),
            label: field.label.clone(),
            kind: compile_kind(field),
        })
        .collect();
    FormValidator { checks }
}

fn compile_kind(field: &FormField) -> CheckKind {
    let rules = &field.validation;
    let required = rules.is_required();
    match field.field_type {
        FieldType::Number => CheckKind::Number {
            required,
            min: rules.min,
            max: rules.max,
        },
        FieldType::Checkbox => CheckKind::Checkbox { required },
        FieldType::Email => CheckKind::Email { required },
        FieldType::Text | FieldType::Textarea | FieldType::Date | FieldType::Select => {
            let pattern = rules
                .pattern
                .as_deref()
                .filter(|raw| !raw.is_empty())
                .and_then(|raw| match PatternRegex::new(raw) {
                    Ok(regex) => Some(regex),
                    Err(err) => {
                        debug!(field = %field.id, pattern = raw, error = %err, "skipping invalid pattern");
                        None
                    }
                });
            CheckKind::Text {
                required,
                min_length: rules.min_length,
                max_length: rules.max_length,
                pattern,
            }
        }
    }
}

impl FormValidator {
    pub fn validate(&self, values: &FormValues) -> ValidationOutcome {
        let errors = self
            .checks
            .iter()
            .filter_map(|check| {
                check
                    .first_error(values.get(&check.id))
                    .map(|message| (check.id.clone(), message))
            })
            .collect::<IndexMap<_, _>>();
        if errors.is_empty() {
            ValidationOutcome::Valid
        } else {
            ValidationOutcome::Invalid { errors }
        }
    }

    /// First error for one field, if the field is known and fails.
    pub fn validate_field(&self, field_id: &str, values: &FormValues) -> Option<String> {
        self.checks
            .iter()
            .find(|check| check.id == field_id)
            .and_then(|check| check.first_error(values.get(field_id)))
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl FieldCheck {
    fn first_error(&self, value: Option<&FieldValue>) -> Option<String> {
        let label = &self.label;
        match &self.kind {
            CheckKind::Number { required, min, max } => {
                // Only an absent value counts as not given; blank text coerces to 0.
                if value.is_none() {
                    return required.then(|| format!("{label} must be a number"));
                }
                let number = coerce_number(value);
                if number.is_nan() {
                    return Some(format!("{label} must be a number"));
                }
                if let Some(min) = min
                    && number < *min
                {
                    return Some(format!(
                        "Number must be greater than or equal to {}",
                        format_number(*min)
                    ));
                }
                if let Some(max) = max
                    && number > *max
                {
                    return Some(format!(
                        "Number must be less than or equal to {}",
                        format_number(*max)
                    ));
                }
                None
            }
            CheckKind::Checkbox { required } => {
                let checked = match value {
                    None => false,
                    Some(FieldValue::Bool(flag)) => *flag,
                    Some(other) => {
                        return Some(format!(
                            "Expected boolean, received {}",
                            other.type_name()
                        ));
                    }
                };
                (*required && !checked).then(|| format!("{label} is required"))
            }
            CheckKind::Email { required } => {
                let text = text_of(value);
                if text.is_empty() {
                    return required.then(|| format!("{label} is required"));
                }
                (!is_email(&text)).then(|| format!("{label} must be a valid email"))
            }
            CheckKind::Text {
                required,
                min_length,
                max_length,
                pattern,
            } => {
                let text = text_of(value);
                if text.is_empty() {
                    return required.then(|| format!("{label} is required"));
                }
                let length = text.chars().count();
                if let Some(min) = min_length
                    && length < *min
                {
                    return Some(format!("Minimum {min} characters"));
                }
                if let Some(max) = max_length
                    && length > *max
                {
                    return Some(format!("Maximum {max} characters"));
                }
                if let Some(regex) = pattern {
                    match regex.is_match(&text) {
                        Ok(true) => {}
                        Ok(false) => return Some("Invalid format".to_string()),
                        Err(err) => {
                            debug!(field = %self.id, error = %err, "pattern match aborted");
                        }
                    }
                }
                None
            }
        }
    }
}

fn text_of(value: Option<&FieldValue>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}

pub fn is_email(text: &str) -> bool {
    !text.starts_with('.') && !text.contains("..") && EMAIL_SHAPE.is_match(text)
}
