use crate::domain::{
    ConditionAction, ConditionOperator, ConditionRule, FieldValue, FormValues, coerce_number,
    coerce_string,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldVisibility {
    pub visible: bool,
    pub disabled: bool,
}

impl Default for FieldVisibility {
    fn default() -> Self {
        Self {
            visible: true,
            disabled: false,
        }
    }
}

/// Evaluate a field's conditions against the current values.
///
/// Rules apply strictly in order, so later rules override earlier ones. A met
/// rule applies its action. An unmet `show` rule hides the field; unmet `hide`
/// and `disable` rules change nothing.
pub fn evaluate(conditions: &[ConditionRule], values: &FormValues) -> FieldVisibility {
    let mut result = FieldVisibility::default();
    for rule in conditions {
        if is_met(rule, values.get(&rule.field_id)) {
            match rule.action {
                ConditionAction::Show => result.visible = true,
                ConditionAction::Hide => result.visible = false,
                ConditionAction::Disable => result.disabled = true,
            }
        } else if rule.action == ConditionAction::Show {
            result.visible = false;
        }
    }
    result
}

/// Whether a single rule holds for `current`, the target field's value.
pub fn is_met(rule: &ConditionRule, current: Option<&FieldValue>) -> bool {
    let expected = rule.value.as_ref();
    match rule.operator {
        ConditionOperator::Equals => coerce_string(current) == coerce_string(expected),
        ConditionOperator::NotEquals => coerce_string(current) != coerce_string(expected),
        ConditionOperator::GreaterThan => coerce_number(current) > coerce_number(expected),
        ConditionOperator::LessThan => coerce_number(current) < coerce_number(expected),
        ConditionOperator::IsTrue => match current {
            Some(FieldValue::Bool(flag)) => *flag,
            Some(FieldValue::Text(text)) => text == "true",
            _ => false,
        },
        // A missing value counts as false; nothing missing counts as true.
        ConditionOperator::IsFalse => match current {
            None | Some(FieldValue::Bool(false)) => true,
            Some(FieldValue::Text(text)) => text == "false",
            _ => false,
        },
    }
}
