use super::history::DEFAULT_HISTORY_CAPACITY;

pub const DEFAULT_SCHEMA_NAME: &str = "Untitled Form";
pub const DEFAULT_STORAGE_KEY: &str = "form_schemas";

#[derive(Debug, Clone)]
pub struct BuilderOptions {
    pub history_capacity: usize,
    pub default_schema_name: String,
    pub storage_key: String,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            default_schema_name: DEFAULT_SCHEMA_NAME.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl BuilderOptions {
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity.max(1);
        self
    }

    pub fn with_default_schema_name(mut self, name: impl Into<String>) -> Self {
        self.default_schema_name = name.into();
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}
