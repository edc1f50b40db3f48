use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{
    field::FormField,
    ids::{generate_field_id, generate_schema_id},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub id: String,
    pub name: String,
    pub fields: Vec<FormField>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FormSchema {
    pub fn empty(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: generate_schema_id(),
            name: name.into(),
            fields: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.id == id)
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Give a fresh id to every field whose id is empty or already taken by
    /// an earlier field. Returns how many ids were replaced.
    pub fn ensure_unique_ids(&mut self) -> usize {
        let mut seen = HashSet::new();
        let mut replaced = 0;
        for field in &mut self.fields {
            if field.id.is_empty() || seen.contains(&field.id) {
                let fresh = generate_field_id();
                warn!(old = %field.id, new = %fresh, "reassigning duplicate field id");
                field.id = fresh;
                replaced += 1;
            }
            seen.insert(field.id.clone());
        }
        replaced
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuilderMode {
    #[default]
    Builder,
    Preview,
}
