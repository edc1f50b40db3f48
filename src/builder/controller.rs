use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, trace};

use crate::{
    domain::{
        BuilderMode, ConditionPatch, ConditionRule, FieldPatch, FieldType, FormField, FormSchema,
        with_added_option, with_removed_option, with_updated_option,
    },
    error::{ImportError, StoreError},
    io::{self, DocumentFormat, ExportOptions, KeyValueStore, MemoryStore, SchemaLibrary},
};

use super::{history::History, options::BuilderOptions, selection::Selection};

/// Owner of the schema being edited, its selection and its undo history.
///
/// Every field mutation computes the next field sequence, records it in the
/// history and then commits it with a refreshed `updated_at`. Operations that
/// name an unknown field id change nothing and report that through their
/// return value.
#[derive(Debug)]
pub struct FormBuilder<S = MemoryStore> {
    schema: FormSchema,
    selection: Selection,
    mode: BuilderMode,
    history: History,
    library: SchemaLibrary<S>,
    options: BuilderOptions,
}

impl FormBuilder<MemoryStore> {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new(), BuilderOptions::default())
    }
}

impl Default for FormBuilder<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: KeyValueStore> FormBuilder<S> {
    pub fn with_store(store: S, options: BuilderOptions) -> Self {
        let schema = FormSchema::empty(options.default_schema_name.clone());
        let history = History::new(schema.fields.clone(), options.history_capacity);
        let library = SchemaLibrary::load(store, options.storage_key.clone());
        Self {
            schema,
            selection: Selection::default(),
            mode: BuilderMode::Builder,
            history,
            library,
            options,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn fields(&self) -> &[FormField] {
        &self.schema.fields
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.schema.field(id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_field_id(&self) -> Option<&str> {
        self.selection.single()
    }

    /// The field shown in the configuration panel.
    pub fn selected_field(&self) -> Option<&FormField> {
        self.selection.single().and_then(|id| self.schema.field(id))
    }

    pub fn mode(&self) -> BuilderMode {
        self.mode
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    pub fn saved_schemas(&self) -> &[FormSchema] {
        self.library.schemas()
    }

    pub fn library(&self) -> &SchemaLibrary<S> {
        &self.library
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn commit(&mut self, fields: Vec<FormField>) {
        self.history.record(fields.clone());
        self.schema.fields = fields;
        self.schema.touch();
    }

    /// Insert a default field of `field_type` at `index` (appended when absent
    /// or past the end) and make it the sole selection.
    pub fn add_field(&mut self, field_type: FieldType, index: Option<usize>) -> String {
        let field = FormField::new(field_type);
        let id = field.id.clone();
        let mut fields = self.schema.fields.clone();
        let at = index.unwrap_or(fields.len()).min(fields.len());
        fields.insert(at, field);
        self.commit(fields);
        self.selection.select(Some(id.clone()));
        debug!(%id, %field_type, at, "added field");
        id
    }

    pub fn remove_field(&mut self, id: &str) -> bool {
        let Some(position) = self.schema.position(id) else {
            trace!(id, "remove_field: unknown id");
            return false;
        };
        let mut fields = self.schema.fields.clone();
        fields.remove(position);
        self.commit(fields);
        self.selection.forget(id);
        debug!(id, "removed field");
        true
    }

    /// Merge `patch` into the field with `id`. A patch that changes nothing is
    /// not recorded.
    pub fn update_field(&mut self, id: &str, patch: FieldPatch) -> bool {
        let Some(position) = self.schema.position(id) else {
            trace!(id, "update_field: unknown id");
            return false;
        };
        let next = patch.merged_into(&self.schema.fields[position]);
        if next == self.schema.fields[position] {
            trace!(id, "update_field: unchanged");
            return false;
        }
        let mut fields = self.schema.fields.clone();
        fields[position] = next;
        self.commit(fields);
        debug!(id, "updated field");
        true
    }

    pub fn reorder_fields(&mut self, from: usize, to: usize) -> bool {
        let len = self.schema.fields.len();
        if from >= len || to >= len || from == to {
            trace!(from, to, len, "reorder_fields: ignored");
            return false;
        }
        let mut fields = self.schema.fields.clone();
        let moved = fields.remove(from);
        fields.insert(to, moved);
        self.commit(fields);
        debug!(from, to, "reordered fields");
        true
    }

    /// Copy the field right after the original and select the copy.
    pub fn duplicate_field(&mut self, id: &str) -> Option<String> {
        let Some(position) = self.schema.position(id) else {
            trace!(id, "duplicate_field: unknown id");
            return None;
        };
        let copy = self.schema.fields[position].duplicate();
        let copy_id = copy.id.clone();
        let mut fields = self.schema.fields.clone();
        fields.insert(position + 1, copy);
        self.commit(fields);
        self.selection.select(Some(copy_id.clone()));
        debug!(id, copy = %copy_id, "duplicated field");
        Some(copy_id)
    }

    /// Duplicate every multi-selected field in one history step. The copies
    /// become the new multi-selection. Returns their ids in display order.
    pub fn duplicate_selected(&mut self) -> Vec<String> {
        if self.selection.multi().is_empty() {
            return Vec::new();
        }
        let positions = self
            .schema
            .fields
            .iter()
            .enumerate()
            .filter(|(_, field)| self.selection.multi().contains(&field.id))
            .map(|(index, _)| index)
            .collect::<Vec<_>>();
        let mut fields = self.schema.fields.clone();
        let mut new_ids = Vec::with_capacity(positions.len());
        // Descending, so earlier positions stay valid while inserting.
        for &index in positions.iter().rev() {
            let copy = fields[index].duplicate();
            new_ids.push(copy.id.clone());
            fields.insert(index + 1, copy);
        }
        new_ids.reverse();
        self.commit(fields);
        self.selection.select_many(new_ids.iter().cloned());
        debug!(count = new_ids.len(), "duplicated selection");
        new_ids
    }

    /// Remove every multi-selected field in one history step.
    pub fn remove_selected(&mut self) -> usize {
        if self.selection.multi().is_empty() {
            return 0;
        }
        let before = self.schema.fields.len();
        let fields = self
            .schema
            .fields
            .iter()
            .filter(|field| !self.selection.multi().contains(&field.id))
            .cloned()
            .collect::<Vec<_>>();
        let removed = before - fields.len();
        self.selection.clear();
        if removed == 0 {
            return 0;
        }
        self.commit(fields);
        debug!(removed, "removed selection");
        removed
    }

    /// Make `id` the sole selection, or clear it with `None`.
    pub fn select_field(&mut self, id: Option<&str>) -> bool {
        match id {
            Some(id) if self.schema.position(id).is_none() => {
                trace!(id, "select_field: unknown id");
                false
            }
            other => {
                self.selection.select(other.map(str::to_string));
                true
            }
        }
    }

    pub fn toggle_field_selection(&mut self, id: &str) -> bool {
        if self.schema.position(id).is_none() {
            trace!(id, "toggle_field_selection: unknown id");
            return false;
        }
        self.selection.toggle(id);
        true
    }

    pub fn select_all_fields(&mut self) {
        let ids = self
            .schema
            .fields
            .iter()
            .map(|field| field.id.clone())
            .collect::<Vec<_>>();
        self.selection.select_many(ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn set_mode(&mut self, mode: BuilderMode) {
        self.mode = mode;
        self.selection.clear();
    }

    /// Rename the schema. Not recorded in history.
    pub fn set_schema_name(&mut self, name: impl Into<String>) {
        self.schema.name = name.into();
        self.schema.touch();
    }

    pub fn add_option(&mut self, id: &str) -> bool {
        let Some(field) = self.schema.field(id) else {
            return false;
        };
        let options = with_added_option(field);
        self.update_field(id, FieldPatch::options(options))
    }

    pub fn update_option(
        &mut self,
        id: &str,
        index: usize,
        label: Option<String>,
        value: Option<String>,
    ) -> bool {
        let Some(options) = self
            .schema
            .field(id)
            .and_then(|field| with_updated_option(field, index, label, value))
        else {
            return false;
        };
        self.update_field(id, FieldPatch::options(options))
    }

    pub fn remove_option(&mut self, id: &str, index: usize) -> bool {
        let Some(options) = self
            .schema
            .field(id)
            .and_then(|field| with_removed_option(field, index))
        else {
            return false;
        };
        self.update_field(id, FieldPatch::options(options))
    }

    /// Append a default condition aimed at the first other field.
    pub fn add_condition(&mut self, id: &str) -> bool {
        let Some(field) = self.schema.field(id) else {
            return false;
        };
        let target = self
            .schema
            .fields
            .iter()
            .find(|other| other.id != id)
            .map(|other| other.id.clone())
            .unwrap_or_default();
        let mut conditions = field.conditions.clone();
        conditions.push(ConditionRule::targeting(target));
        self.update_field(id, FieldPatch::conditions(conditions))
    }

    pub fn update_condition(&mut self, id: &str, index: usize, patch: ConditionPatch) -> bool {
        let Some(field) = self.schema.field(id) else {
            return false;
        };
        let mut conditions = field.conditions.clone();
        let Some(rule) = conditions.get_mut(index) else {
            return false;
        };
        patch.apply(rule);
        self.update_field(id, FieldPatch::conditions(conditions))
    }

    pub fn remove_condition(&mut self, id: &str, index: usize) -> bool {
        let Some(field) = self.schema.field(id) else {
            return false;
        };
        if index >= field.conditions.len() {
            return false;
        }
        let mut conditions = field.conditions.clone();
        conditions.remove(index);
        self.update_field(id, FieldPatch::conditions(conditions))
    }

    pub fn undo(&mut self) -> bool {
        let Some(fields) = self.history.undo() else {
            return false;
        };
        self.restore(fields);
        debug!(index = self.history.index(), "undo");
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(fields) = self.history.redo() else {
            return false;
        };
        self.restore(fields);
        debug!(index = self.history.index(), "redo");
        true
    }

    fn restore(&mut self, fields: Vec<FormField>) {
        self.schema.fields = fields;
        self.schema.touch();
        self.selection.clear();
    }

    /// Replace the active schema and start a fresh single-entry history.
    fn replace_schema(&mut self, schema: FormSchema) {
        self.history.reset(schema.fields.clone());
        self.schema = schema;
        self.selection.clear();
        self.mode = BuilderMode::Builder;
    }

    pub fn import_schema(&mut self, mut schema: FormSchema) {
        schema.ensure_unique_ids();
        schema.touch();
        debug!(schema = %schema.id, fields = schema.fields.len(), "imported schema");
        self.replace_schema(schema);
    }

    /// Parse, coerce and import a document. On error the active schema is
    /// left as it was.
    pub fn import_document(
        &mut self,
        contents: &str,
        format: DocumentFormat,
    ) -> Result<(), ImportError> {
        let schema = io::import_schema_str(contents, format)?;
        self.import_schema(schema);
        Ok(())
    }

    pub fn reset_schema(&mut self) {
        let empty = FormSchema::empty(self.options.default_schema_name.clone());
        debug!(schema = %empty.id, "reset schema");
        self.replace_schema(empty);
    }

    /// Upsert a snapshot of the current schema into the saved library.
    pub fn save_schema(&mut self) -> Result<(), StoreError> {
        let mut snapshot = self.schema.clone();
        snapshot.touch();
        self.library.upsert(snapshot.clone())?;
        debug!(schema = %snapshot.id, "saved schema");
        self.schema = snapshot;
        Ok(())
    }

    pub fn load_schema(&mut self, id: &str) -> bool {
        let Some(found) = self.library.find(id).cloned() else {
            trace!(id, "load_schema: unknown id");
            return false;
        };
        debug!(schema = %found.id, "loaded schema");
        self.replace_schema(found);
        true
    }

    pub fn export_file_name(&self, format: DocumentFormat) -> String {
        io::export_file_name(&self.schema.name, format)
    }

    pub fn export(&self, options: &ExportOptions) -> Result<Vec<PathBuf>> {
        io::emit(&self.schema, options)
    }
}
