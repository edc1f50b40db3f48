use crate::{
    builder::{BuilderOptions, FormBuilder},
    domain::{BuilderMode, FieldPatch, FieldType},
    io::{DocumentFormat, KeyValueStore, MemoryStore},
};

#[test]
fn save_then_load_restores_snapshot() {
    let mut builder = FormBuilder::new();
    builder.set_schema_name("Contact");
    let id = builder.add_field(FieldType::Email, None);
    builder.save_schema().unwrap();
    let saved_id = builder.schema().id.clone();

    builder.update_field(&id, FieldPatch::label("Work email"));
    assert_eq!(builder.saved_schemas()[0].fields[0].label, "Email Field");

    assert!(builder.load_schema(&saved_id));
    assert_eq!(builder.fields()[0].label, "Email Field");
    assert!(!builder.can_undo());
    assert!(builder.selection().is_empty());
}

#[test]
fn saving_twice_replaces_the_entry() {
    let mut builder = FormBuilder::new();
    builder.save_schema().unwrap();
    builder.set_schema_name("Second pass");
    builder.save_schema().unwrap();
    assert_eq!(builder.saved_schemas().len(), 1);
    assert_eq!(builder.saved_schemas()[0].name, "Second pass");

    builder.reset_schema();
    builder.save_schema().unwrap();
    assert_eq!(builder.saved_schemas().len(), 2);
}

#[test]
fn saved_list_is_persisted_under_storage_key() {
    let options = BuilderOptions::default().with_storage_key("drafts");
    let mut builder = FormBuilder::with_store(MemoryStore::new(), options.clone());
    builder.add_field(FieldType::Textarea, None);
    builder.save_schema().unwrap();

    let store = builder.library().store().clone();
    let raw = store.get("drafts").unwrap().unwrap();
    assert!(raw.contains("\"type\":\"textarea\""));

    let reopened = FormBuilder::with_store(store, options);
    assert_eq!(reopened.saved_schemas().len(), 1);
}

#[test]
fn load_unknown_id_keeps_state() {
    let mut builder = FormBuilder::new();
    builder.add_field(FieldType::Text, None);
    let before = builder.schema().clone();
    assert!(!builder.load_schema("schema_missing"));
    assert_eq!(builder.schema(), &before);
    assert!(builder.can_undo());
}

#[test]
fn import_replaces_schema_and_history() {
    let mut builder = FormBuilder::new();
    builder.add_field(FieldType::Text, None);
    builder.set_mode(BuilderMode::Preview);
    let document = r#"{
        "name": "Imported",
        "fields": [
            {"id": "a", "type": "text", "label": "A"},
            {"id": "a", "type": "number", "label": "B"}
        ]
    }"#;
    builder.import_document(document, DocumentFormat::Json).unwrap();

    assert_eq!(builder.schema().name, "Imported");
    assert_eq!(builder.fields().len(), 2);
    assert_eq!(builder.fields()[0].id, "a");
    assert_ne!(builder.fields()[1].id, "a");
    assert_eq!(builder.mode(), BuilderMode::Builder);
    assert!(!builder.can_undo());
}

#[test]
fn rejected_import_leaves_schema_untouched() {
    let mut builder = FormBuilder::new();
    builder.add_field(FieldType::Text, None);
    let before = builder.schema().clone();

    let err = builder
        .import_document(r#"{"name": "x", "fields": {}}"#, DocumentFormat::Json)
        .unwrap_err();
    assert!(!err.is_syntax());
    let err = builder
        .import_document("{not json", DocumentFormat::Json)
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid JSON. Please check the syntax.");

    assert_eq!(builder.schema(), &before);
    assert!(builder.can_undo());
}

#[test]
fn export_name_replaces_whitespace() {
    let mut builder = FormBuilder::new();
    builder.set_schema_name("Customer  feedback form");
    assert_eq!(
        builder.export_file_name(DocumentFormat::Json),
        "Customer_feedback_form.json"
    );
}
