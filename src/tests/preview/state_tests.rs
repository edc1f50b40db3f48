use crate::{
    builder::FormBuilder,
    domain::{
        ConditionAction, ConditionOperator, ConditionRule, FieldPatch, FieldType, FieldValue,
        ValidationRules,
    },
    preview::PreviewState,
    rules,
};

/// A consent checkbox that reveals a required email field.
fn consent_form() -> (FormBuilder, String, String) {
    let mut builder = FormBuilder::new();
    let consent = builder.add_field(FieldType::Checkbox, None);
    let email = builder.add_field(FieldType::Email, None);
    builder.update_field(
        &email,
        FieldPatch {
            label: Some("Email".into()),
            validation: Some(ValidationRules {
                required: Some(true),
                ..Default::default()
            }),
            conditions: Some(vec![ConditionRule::new(
                consent.clone(),
                ConditionOperator::IsTrue,
                None,
                ConditionAction::Show,
            )]),
            ..Default::default()
        },
    );
    (builder, consent, email)
}

#[test]
fn condition_reveals_field_as_values_change() {
    let (builder, consent, email) = consent_form();
    let mut preview = PreviewState::new();

    let shown = preview
        .visible_fields(builder.fields())
        .map(|(field, _)| field.id.clone())
        .collect::<Vec<_>>();
    assert_eq!(shown, [consent.clone()]);

    preview.set_value(&consent, true);
    let shown = preview
        .visible_fields(builder.fields())
        .map(|(field, _)| field.id.clone())
        .collect::<Vec<_>>();
    assert_eq!(shown, [consent, email]);
}

#[test]
fn hidden_required_field_still_blocks_submit() {
    let (builder, _, email) = consent_form();
    let mut preview = PreviewState::new();
    assert!(!preview.submit_fields(builder.fields()));
    assert_eq!(preview.error(&email), Some("Email is required"));
    assert_eq!(preview.status().message(), "1 issue(s) remaining");
}

#[test]
fn fixing_values_lets_the_form_submit() {
    let (builder, consent, email) = consent_form();
    let validator = rules::compile(builder.fields());
    let mut preview = PreviewState::new();

    preview.set_value(&consent, true);
    preview.set_value(&email, "not-an-email");
    assert!(!preview.submit(&validator));
    assert_eq!(preview.error(&email), Some("Email must be a valid email"));

    preview.set_value(&email, "user@example.com");
    assert!(preview.error(&email).is_none());
    assert!(preview.submit(&validator));
    assert!(preview.is_submitted());
    let payload = preview.values_json();
    assert_eq!(payload[consent.as_str()], serde_json::json!(true));
    assert_eq!(payload[email.as_str()], serde_json::json!("user@example.com"));
}

#[test]
fn disable_action_keeps_field_visible() {
    let mut builder = FormBuilder::new();
    let toggle = builder.add_field(FieldType::Checkbox, None);
    let notes = builder.add_field(FieldType::Textarea, None);
    builder.update_field(
        &notes,
        FieldPatch::conditions(vec![ConditionRule::new(
            toggle.clone(),
            ConditionOperator::IsFalse,
            None,
            ConditionAction::Disable,
        )]),
    );

    let mut preview = PreviewState::new();
    let notes_field = builder.field(&notes).unwrap();
    // An untouched checkbox counts as unchecked.
    assert!(preview.visibility(notes_field).disabled);
    preview.set_value(&toggle, FieldValue::Bool(true));
    assert!(!preview.visibility(notes_field).disabled);
    preview.set_value(&toggle, FieldValue::Bool(false));
    let visibility = preview.visibility(notes_field);
    assert!(visibility.visible);
    assert!(visibility.disabled);
}
