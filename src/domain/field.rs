use std::fmt;

use serde::{Deserialize, Serialize};

use super::{condition::ConditionRule, ids::generate_field_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Email,
    Select,
    Checkbox,
    Date,
    Textarea,
}

impl FieldType {
    /// Palette order.
    pub const ALL: [FieldType; 7] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Email,
        FieldType::Select,
        FieldType::Checkbox,
        FieldType::Date,
        FieldType::Textarea,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
            FieldType::Textarea => "textarea",
        }
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        FieldType::ALL
            .into_iter()
            .find(|field_type| field_type.as_str() == raw)
    }

    /// Name shown in the field palette.
    pub fn label(self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Number => "Number",
            FieldType::Email => "Email",
            FieldType::Select => "Select",
            FieldType::Checkbox => "Checkbox",
            FieldType::Date => "Date",
            FieldType::Textarea => "Text Area",
        }
    }

    /// Label given to a freshly added field, e.g. `Textarea Field`.
    pub fn default_label(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("{}{} Field", first.to_ascii_uppercase(), chars.as_str()),
            None => "Field".to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// The `n`th generated option (1-based).
    pub fn numbered(n: usize) -> Self {
        Self::new(format!("Option {n}"), format!("option_{n}"))
    }
}

/// Declarative constraints. Each one is enforced only when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl ValidationRules {
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        *self == ValidationRules::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(default)]
    pub validation: ValidationRules,
    #[serde(default)]
    pub conditions: Vec<ConditionRule>,
}

impl FormField {
    /// A default-populated field with a fresh id.
    pub fn new(field_type: FieldType) -> Self {
        Self::with_id(generate_field_id(), field_type)
    }

    pub fn with_id(id: impl Into<String>, field_type: FieldType) -> Self {
        let options = (field_type == FieldType::Select)
            .then(|| vec![SelectOption::numbered(1), SelectOption::numbered(2)]);
        Self {
            id: id.into(),
            field_type,
            label: field_type.default_label(),
            placeholder: String::new(),
            options,
            validation: ValidationRules::default(),
            conditions: Vec::new(),
        }
    }

    /// Independent copy under a new id, labelled as a copy.
    pub fn duplicate(&self) -> Self {
        Self {
            id: generate_field_id(),
            label: format!("{} (copy)", self.label),
            ..self.clone()
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        self.options.as_deref().unwrap_or_default()
    }

    pub fn is_required(&self) -> bool {
        self.validation.is_required()
    }

    pub fn references(&self, field_id: &str) -> bool {
        self.conditions.iter().any(|rule| rule.field_id == field_id)
    }
}

/// Partial update merged into a field record. The id is not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub field_type: Option<FieldType>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub options: Option<Option<Vec<SelectOption>>>,
    pub validation: Option<ValidationRules>,
    pub conditions: Option<Vec<ConditionRule>>,
}

impl FieldPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn validation(rules: ValidationRules) -> Self {
        Self {
            validation: Some(rules),
            ..Self::default()
        }
    }

    pub fn options(options: Vec<SelectOption>) -> Self {
        Self {
            options: Some(Some(options)),
            ..Self::default()
        }
    }

    pub fn conditions(conditions: Vec<ConditionRule>) -> Self {
        Self {
            conditions: Some(conditions),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == FieldPatch::default()
    }

    /// Merge into `field`, producing the replacement record.
    pub fn merged_into(self, field: &FormField) -> FormField {
        let mut next = field.clone();
        if let Some(field_type) = self.field_type {
            next.field_type = field_type;
        }
        if let Some(label) = self.label {
            next.label = label;
        }
        if let Some(placeholder) = self.placeholder {
            next.placeholder = placeholder;
        }
        if let Some(options) = self.options {
            next.options = options;
        }
        if let Some(validation) = self.validation {
            next.validation = validation;
        }
        if let Some(conditions) = self.conditions {
            next.conditions = conditions;
        }
        next
    }
}

/// Option list with a generated option appended.
pub fn with_added_option(field: &FormField) -> Vec<SelectOption> {
    let mut options = field.options().to_vec();
    options.push(SelectOption::numbered(options.len() + 1));
    options
}

/// Option list with the entry at `index` edited; `None` when out of range.
pub fn with_updated_option(
    field: &FormField,
    index: usize,
    label: Option<String>,
    value: Option<String>,
) -> Option<Vec<SelectOption>> {
    let mut options = field.options().to_vec();
    let option = options.get_mut(index)?;
    if let Some(label) = label {
        option.label = label;
    }
    if let Some(value) = value {
        option.value = value;
    }
    Some(options)
}

/// Option list without the entry at `index`; `None` when out of range.
pub fn with_removed_option(field: &FormField, index: usize) -> Option<Vec<SelectOption>> {
    if index >= field.options().len() {
        return None;
    }
    let mut options = field.options().to_vec();
    options.remove(index);
    Some(options)
}
