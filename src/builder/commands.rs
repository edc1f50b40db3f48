use crate::{
    domain::{BuilderMode, FieldType},
    io::KeyValueStore,
};

use super::controller::FormBuilder;

/// Discrete builder operations as raised by UI events and shortcuts.
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderCommand {
    AddField {
        field_type: FieldType,
        index: Option<usize>,
    },
    RemoveField {
        id: String,
    },
    DuplicateField {
        id: String,
    },
    ReorderFields {
        from: usize,
        to: usize,
    },
    SelectField {
        id: Option<String>,
    },
    ToggleSelection {
        id: String,
    },
    SelectAll,
    ClearSelection,
    /// Multi-selection if any, otherwise the single selection.
    DeleteSelection,
    /// Multi-selection if any, otherwise the single selection.
    DuplicateSelection,
    Undo,
    Redo,
    SetMode(BuilderMode),
}

impl<S: KeyValueStore> FormBuilder<S> {
    /// Apply one command. Returns whether anything changed.
    pub fn dispatch(&mut self, command: BuilderCommand) -> bool {
        match command {
            BuilderCommand::AddField { field_type, index } => {
                self.add_field(field_type, index);
                true
            }
            BuilderCommand::RemoveField { id } => self.remove_field(&id),
            BuilderCommand::DuplicateField { id } => self.duplicate_field(&id).is_some(),
            BuilderCommand::ReorderFields { from, to } => self.reorder_fields(from, to),
            BuilderCommand::SelectField { id } => self.select_field(id.as_deref()),
            BuilderCommand::ToggleSelection { id } => self.toggle_field_selection(&id),
            BuilderCommand::SelectAll => {
                self.select_all_fields();
                true
            }
            BuilderCommand::ClearSelection => {
                self.clear_selection();
                true
            }
            BuilderCommand::DeleteSelection => {
                if !self.selection().multi().is_empty() {
                    self.remove_selected() > 0
                } else if let Some(id) = self.selected_field_id().map(str::to_string) {
                    self.remove_field(&id)
                } else {
                    false
                }
            }
            BuilderCommand::DuplicateSelection => {
                if !self.selection().multi().is_empty() {
                    !self.duplicate_selected().is_empty()
                } else if let Some(id) = self.selected_field_id().map(str::to_string) {
                    self.duplicate_field(&id).is_some()
                } else {
                    false
                }
            }
            BuilderCommand::Undo => self.undo(),
            BuilderCommand::Redo => self.redo(),
            BuilderCommand::SetMode(mode) => {
                self.set_mode(mode);
                true
            }
        }
    }
}
