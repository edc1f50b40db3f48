use serde::{Deserialize, Serialize};

use super::value::FieldValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    IsTrue,
    IsFalse,
}

impl ConditionOperator {
    pub const ALL: [ConditionOperator; 6] = [
        ConditionOperator::Equals,
        ConditionOperator::NotEquals,
        ConditionOperator::GreaterThan,
        ConditionOperator::LessThan,
        ConditionOperator::IsTrue,
        ConditionOperator::IsFalse,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ConditionOperator::Equals => "Equals",
            ConditionOperator::NotEquals => "Not Equals",
            ConditionOperator::GreaterThan => "Greater Than",
            ConditionOperator::LessThan => "Less Than",
            ConditionOperator::IsTrue => "Is True",
            ConditionOperator::IsFalse => "Is False",
        }
    }

    /// Whether the operator reads the rule's comparand.
    pub fn uses_value(self) -> bool {
        !matches!(self, ConditionOperator::IsTrue | ConditionOperator::IsFalse)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionAction {
    Show,
    Hide,
    Disable,
}

/// A show/hide/disable rule keyed off another field's current value.
///
/// `field_id` is a weak reference: the target may have been removed, in which
/// case the rule sees a missing value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionRule {
    pub field_id: String,
    pub operator: ConditionOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    pub action: ConditionAction,
}

impl ConditionRule {
    pub fn new(
        field_id: impl Into<String>,
        operator: ConditionOperator,
        value: Option<FieldValue>,
        action: ConditionAction,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            operator,
            value,
            action,
        }
    }

    /// The rule a freshly added condition starts from.
    pub fn targeting(field_id: impl Into<String>) -> Self {
        Self::new(
            field_id,
            ConditionOperator::Equals,
            Some(FieldValue::text("")),
            ConditionAction::Show,
        )
    }
}

/// Partial update for one condition rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionPatch {
    pub field_id: Option<String>,
    pub operator: Option<ConditionOperator>,
    pub value: Option<Option<FieldValue>>,
    pub action: Option<ConditionAction>,
}

impl ConditionPatch {
    pub fn apply(self, rule: &mut ConditionRule) {
        if let Some(field_id) = self.field_id {
            rule.field_id = field_id;
        }
        if let Some(operator) = self.operator {
            rule.operator = operator;
        }
        if let Some(value) = self.value {
            rule.value = value;
        }
        if let Some(action) = self.action {
            rule.action = action;
        }
    }
}
