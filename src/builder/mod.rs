mod commands;
mod controller;
mod history;
mod keymap;
mod options;
mod selection;

pub use commands::BuilderCommand;
pub use controller::FormBuilder;
pub use history::{DEFAULT_HISTORY_CAPACITY, History};
pub use keymap::{ShortcutContext, classify_key, help_text};
pub use options::{BuilderOptions, DEFAULT_SCHEMA_NAME, DEFAULT_STORAGE_KEY};
pub use selection::Selection;
