use crate::{
    builder::FormBuilder,
    domain::{ConditionOperator, ConditionPatch, FieldPatch, FieldType, SelectOption, ValidationRules},
};

fn builder_with(types: &[FieldType]) -> (FormBuilder, Vec<String>) {
    let mut builder = FormBuilder::new();
    let ids = types
        .iter()
        .map(|field_type| builder.add_field(*field_type, None))
        .collect();
    (builder, ids)
}

fn ids(builder: &FormBuilder) -> Vec<String> {
    builder.schema().field_ids().map(str::to_string).collect()
}

#[test]
fn add_field_appends_or_inserts_and_selects() {
    let (mut builder, existing) = builder_with(&[FieldType::Text, FieldType::Email]);
    let inserted = builder.add_field(FieldType::Select, Some(1));
    assert_eq!(ids(&builder), [existing[0].clone(), inserted.clone(), existing[1].clone()]);
    assert_eq!(builder.selected_field_id(), Some(inserted.as_str()));
    assert!(builder.selection().multi().is_empty());

    let field = builder.field(&inserted).unwrap();
    assert_eq!(field.label, "Select Field");
    assert_eq!(field.placeholder, "");
    assert_eq!(field.options().len(), 2);

    let tail = builder.add_field(FieldType::Date, Some(99));
    assert_eq!(ids(&builder).last(), Some(&tail));
}

#[test]
fn remove_field_clears_its_selection() {
    let (mut builder, ids_before) = builder_with(&[FieldType::Text, FieldType::Number]);
    builder.select_field(Some(&ids_before[0]));
    assert!(builder.remove_field(&ids_before[0]));
    assert_eq!(builder.selected_field_id(), None);
    assert_eq!(ids(&builder), [ids_before[1].clone()]);
}

#[test]
fn remove_field_keeps_other_selection() {
    let (mut builder, ids_before) = builder_with(&[FieldType::Text, FieldType::Number]);
    builder.select_field(Some(&ids_before[1]));
    builder.remove_field(&ids_before[0]);
    assert_eq!(builder.selected_field_id(), Some(ids_before[1].as_str()));
}

#[test]
fn unknown_ids_are_silent_noops() {
    let (mut builder, _) = builder_with(&[FieldType::Text]);
    let before = builder.schema().clone();
    let history_len = builder.history().len();

    assert!(!builder.remove_field("missing"));
    assert!(!builder.update_field("missing", FieldPatch::label("x")));
    assert!(builder.duplicate_field("missing").is_none());
    assert!(!builder.select_field(Some("missing")));
    assert!(!builder.toggle_field_selection("missing"));
    assert!(!builder.add_option("missing"));
    assert!(!builder.add_condition("missing"));

    assert_eq!(builder.schema(), &before);
    assert_eq!(builder.history().len(), history_len);
}

#[test]
fn update_field_merges_patch() {
    let (mut builder, ids) = builder_with(&[FieldType::Text]);
    let rules = ValidationRules {
        required: Some(true),
        max_length: Some(20),
        ..Default::default()
    };
    assert!(builder.update_field(&ids[0], FieldPatch::validation(rules.clone())));
    assert!(builder.update_field(&ids[0], FieldPatch::label("Full name")));
    let field = builder.field(&ids[0]).unwrap();
    assert_eq!(field.label, "Full name");
    assert_eq!(field.validation, rules);
    assert_eq!(field.id, ids[0]);
}

#[test]
fn unchanged_update_is_not_recorded() {
    let (mut builder, ids) = builder_with(&[FieldType::Text]);
    let len = builder.history().len();
    assert!(!builder.update_field(&ids[0], FieldPatch::label("Text Field")));
    assert!(!builder.update_field(&ids[0], FieldPatch::default()));
    assert_eq!(builder.history().len(), len);
}

#[test]
fn mutations_refresh_updated_at() {
    let (mut builder, ids) = builder_with(&[FieldType::Text]);
    let before = builder.schema().updated_at;
    builder.update_field(&ids[0], FieldPatch::label("Later"));
    assert!(builder.schema().updated_at >= before);
    let created = builder.schema().created_at;
    builder.set_schema_name("Renamed");
    assert_eq!(builder.schema().created_at, created);
    assert_eq!(builder.schema().name, "Renamed");
}

#[test]
fn reorder_moves_and_shifts() {
    let (mut builder, original) =
        builder_with(&[FieldType::Text, FieldType::Number, FieldType::Email, FieldType::Date]);
    assert!(builder.reorder_fields(0, 2));
    assert_eq!(
        ids(&builder),
        [
            original[1].clone(),
            original[2].clone(),
            original[0].clone(),
            original[3].clone()
        ]
    );
    assert!(builder.reorder_fields(3, 0));
    assert_eq!(ids(&builder)[0], original[3]);
}

#[test]
fn reorder_rejects_out_of_bounds() {
    let (mut builder, _) = builder_with(&[FieldType::Text, FieldType::Number]);
    let before = ids(&builder);
    assert!(!builder.reorder_fields(0, 2));
    assert!(!builder.reorder_fields(5, 0));
    assert!(!builder.reorder_fields(1, 1));
    assert_eq!(ids(&builder), before);
}

#[test]
fn duplicate_inserts_copy_after_original() {
    let (mut builder, original) = builder_with(&[FieldType::Text, FieldType::Select]);
    builder.update_field(&original[0], FieldPatch::label("Name"));
    let copy = builder.duplicate_field(&original[0]).unwrap();
    assert_eq!(ids(&builder), [original[0].clone(), copy.clone(), original[1].clone()]);
    assert_eq!(builder.field(&copy).unwrap().label, "Name (copy)");
    assert_eq!(builder.selected_field_id(), Some(copy.as_str()));
}

#[test]
fn duplicate_selected_places_each_copy_after_its_original() {
    let (mut builder, original) = builder_with(&[
        FieldType::Text,
        FieldType::Number,
        FieldType::Email,
        FieldType::Checkbox,
    ]);
    let history_len = builder.history().len();
    builder.toggle_field_selection(&original[1]);
    builder.toggle_field_selection(&original[3]);

    let copies = builder.duplicate_selected();
    assert_eq!(copies.len(), 2);
    assert_eq!(
        ids(&builder),
        [
            original[0].clone(),
            original[1].clone(),
            copies[0].clone(),
            original[2].clone(),
            original[3].clone(),
            copies[1].clone(),
        ]
    );
    assert_eq!(builder.history().len(), history_len + 1);
    let selected = builder.selection().multi().iter().cloned().collect::<Vec<_>>();
    assert_eq!(selected, copies);
    assert_eq!(builder.selected_field_id(), None);
}

#[test]
fn duplicate_selected_without_multi_selection_does_nothing() {
    let (mut builder, original) = builder_with(&[FieldType::Text]);
    builder.select_field(Some(&original[0]));
    assert!(builder.duplicate_selected().is_empty());
    assert_eq!(builder.fields().len(), 1);
}

#[test]
fn remove_selected_drops_all_members() {
    let (mut builder, original) =
        builder_with(&[FieldType::Text, FieldType::Number, FieldType::Email]);
    builder.select_all_fields();
    builder.toggle_field_selection(&original[1]);
    assert_eq!(builder.remove_selected(), 2);
    assert_eq!(ids(&builder), [original[1].clone()]);
    assert!(builder.selection().is_empty());
}

#[test]
fn select_all_then_single_select() {
    let (mut builder, original) = builder_with(&[FieldType::Text, FieldType::Number]);
    builder.select_all_fields();
    assert_eq!(builder.selection().multi().len(), 2);
    assert_eq!(builder.selected_field_id(), None);
    builder.select_field(Some(&original[0]));
    assert!(builder.selection().multi().is_empty());
    builder.clear_selection();
    assert!(builder.selection().is_empty());
}

#[test]
fn option_helpers_are_undoable_updates() {
    let (mut builder, ids) = builder_with(&[FieldType::Select]);
    assert!(builder.add_option(&ids[0]));
    assert!(builder.update_option(&ids[0], 2, Some("Maybe".into()), Some("maybe".into())));
    assert!(builder.remove_option(&ids[0], 0));
    assert!(!builder.remove_option(&ids[0], 10));
    assert_eq!(
        builder.field(&ids[0]).unwrap().options(),
        &[
            SelectOption::new("Option 2", "option_2"),
            SelectOption::new("Maybe", "maybe"),
        ]
    );
    builder.undo();
    assert_eq!(builder.field(&ids[0]).unwrap().options().len(), 3);
}

#[test]
fn conditions_target_first_other_field() {
    let (mut builder, ids) = builder_with(&[FieldType::Checkbox, FieldType::Text]);
    assert!(builder.add_condition(&ids[1]));
    let rule = &builder.field(&ids[1]).unwrap().conditions[0];
    assert_eq!(rule.field_id, ids[0]);
    assert_eq!(rule.operator, ConditionOperator::Equals);

    let patch = ConditionPatch {
        operator: Some(ConditionOperator::IsTrue),
        ..Default::default()
    };
    assert!(builder.update_condition(&ids[1], 0, patch));
    assert_eq!(
        builder.field(&ids[1]).unwrap().conditions[0].operator,
        ConditionOperator::IsTrue
    );
    assert!(!builder.update_condition(&ids[1], 3, ConditionPatch::default()));
    assert!(builder.remove_condition(&ids[1], 0));
    assert!(builder.field(&ids[1]).unwrap().conditions.is_empty());
}

#[test]
fn lone_field_condition_has_empty_target() {
    let (mut builder, ids) = builder_with(&[FieldType::Text]);
    builder.add_condition(&ids[0]);
    assert_eq!(builder.field(&ids[0]).unwrap().conditions[0].field_id, "");
}
