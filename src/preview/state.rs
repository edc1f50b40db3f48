use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::{
    domain::{FieldValue, FormField, FormValues},
    rules::{self, FieldVisibility, FormValidator, ValidationOutcome},
};

use super::status::StatusLine;

/// Runtime state of a rendered form: entered values, per-field errors and
/// whether the last submit passed.
#[derive(Debug, Clone, Default)]
pub struct PreviewState {
    values: FormValues,
    errors: IndexMap<String, String>,
    submitted: bool,
    status: StatusLine,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.values.get(field_id)
    }

    /// Store a value and drop the field's stale error.
    pub fn set_value(&mut self, field_id: &str, value: impl Into<FieldValue>) {
        self.values.insert(field_id.to_string(), value.into());
        self.errors.shift_remove(field_id);
        self.status.value_updated();
    }

    pub fn error(&self, field_id: &str) -> Option<&str> {
        self.errors.get(field_id).map(String::as_str)
    }

    pub fn errors(&self) -> &IndexMap<String, String> {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_dirty(&self) -> bool {
        !self.values.is_empty()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn visibility(&self, field: &FormField) -> FieldVisibility {
        rules::evaluate(&field.conditions, &self.values)
    }

    /// Fields to render, in order, with their disabled flag.
    pub fn visible_fields<'a>(
        &'a self,
        fields: &'a [FormField],
    ) -> impl Iterator<Item = (&'a FormField, FieldVisibility)> + 'a {
        fields
            .iter()
            .map(|field| (field, self.visibility(field)))
            .filter(|(_, visibility)| visibility.visible)
    }

    /// Validate every field, hidden ones included. Returns whether the form
    /// was accepted.
    pub fn submit(&mut self, validator: &FormValidator) -> bool {
        match validator.validate(&self.values) {
            ValidationOutcome::Valid => {
                self.errors.clear();
                self.submitted = true;
                self.status.submitted();
                debug!(values = self.values.len(), "form submitted");
                true
            }
            ValidationOutcome::Invalid { errors } => {
                self.status.issues_remaining(errors.len());
                debug!(issues = errors.len(), "form rejected");
                self.errors = errors;
                self.submitted = false;
                false
            }
        }
    }

    pub fn submit_fields(&mut self, fields: &[FormField]) -> bool {
        let validator = rules::compile(fields);
        self.submit(&validator)
    }

    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.submitted = false;
        self.status.ready();
    }

    /// The submitted payload as a JSON object.
    pub fn values_json(&self) -> Value {
        serde_json::to_value(&self.values).unwrap_or(Value::Null)
    }
}
