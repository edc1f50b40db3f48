use crate::{
    builder::{BuilderOptions, DEFAULT_HISTORY_CAPACITY, FormBuilder},
    domain::{FieldPatch, FieldType},
    io::MemoryStore,
};

#[test]
fn undo_restores_exact_previous_fields() {
    let mut builder = FormBuilder::new();
    let id = builder.add_field(FieldType::Text, None);
    let before = builder.fields().to_vec();
    builder.update_field(&id, FieldPatch::label("Changed"));
    builder.add_field(FieldType::Number, None);

    assert!(builder.undo());
    assert!(builder.undo());
    assert_eq!(builder.fields(), before.as_slice());
    assert!(builder.selection().is_empty());
}

#[test]
fn redo_reapplies_undone_mutation() {
    let mut builder = FormBuilder::new();
    builder.add_field(FieldType::Text, None);
    let after = builder.fields().to_vec();
    builder.undo();
    assert!(builder.fields().is_empty());
    assert!(builder.redo());
    assert_eq!(builder.fields(), after.as_slice());
    assert!(!builder.redo());
}

#[test]
fn undo_at_start_is_noop() {
    let mut builder = FormBuilder::new();
    assert!(!builder.can_undo());
    assert!(!builder.undo());
    assert!(!builder.can_redo());
}

#[test]
fn mutation_after_undo_discards_redo() {
    let mut builder = FormBuilder::new();
    builder.add_field(FieldType::Text, None);
    builder.add_field(FieldType::Email, None);
    builder.undo();
    assert!(builder.can_redo());
    builder.add_field(FieldType::Date, None);
    assert!(!builder.can_redo());
    assert_eq!(builder.fields()[1].field_type, FieldType::Date);
}

#[test]
fn oldest_entry_is_evicted_at_capacity() {
    let mut builder = FormBuilder::new();
    for _ in 0..=DEFAULT_HISTORY_CAPACITY {
        builder.add_field(FieldType::Text, None);
    }
    assert_eq!(builder.history().len(), DEFAULT_HISTORY_CAPACITY);

    let mut undos = 0;
    while builder.undo() {
        undos += 1;
    }
    assert_eq!(undos, DEFAULT_HISTORY_CAPACITY - 1);
    // The empty starting state was evicted; the oldest survivor has two fields.
    assert_eq!(builder.fields().len(), 2);
}

#[test]
fn custom_capacity_is_honoured() {
    let options = BuilderOptions::default().with_history_capacity(3);
    let mut builder = FormBuilder::with_store(MemoryStore::new(), options);
    for _ in 0..5 {
        builder.add_field(FieldType::Checkbox, None);
    }
    assert_eq!(builder.history().len(), 3);
    assert!(builder.undo());
    assert!(builder.undo());
    assert!(!builder.undo());
    assert_eq!(builder.fields().len(), 3);
}

#[test]
fn renaming_is_not_undoable() {
    let mut builder = FormBuilder::new();
    builder.add_field(FieldType::Text, None);
    builder.set_schema_name("Survey");
    builder.undo();
    assert_eq!(builder.schema().name, "Survey");
    assert!(builder.fields().is_empty());
}

#[test]
fn selection_changes_are_not_recorded() {
    let mut builder = FormBuilder::new();
    let id = builder.add_field(FieldType::Text, None);
    let len = builder.history().len();
    builder.select_field(None);
    builder.toggle_field_selection(&id);
    builder.select_all_fields();
    builder.clear_selection();
    assert_eq!(builder.history().len(), len);
}

#[test]
fn reset_starts_a_fresh_history() {
    let mut builder = FormBuilder::new();
    builder.add_field(FieldType::Text, None);
    builder.add_field(FieldType::Text, None);
    let old_id = builder.schema().id.clone();
    builder.reset_schema();

    assert_ne!(builder.schema().id, old_id);
    assert_eq!(builder.schema().name, "Untitled Form");
    assert!(builder.fields().is_empty());
    assert_eq!(builder.history().len(), 1);
    assert_eq!(builder.history().index(), 0);
    assert!(!builder.can_undo());
}
