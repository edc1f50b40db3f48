use std::path::PathBuf;

use thiserror::Error;

use crate::io::DocumentFormat;

/// Why an import document was rejected. The active schema is untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid {}. Please check the syntax.", .format.label())]
    Syntax {
        format: DocumentFormat,
        message: String,
    },
    #[error("Invalid schema: {0}")]
    Shape(&'static str),
}

impl ImportError {
    pub fn is_syntax(&self) -> bool {
        matches!(self, ImportError::Syntax { .. })
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access stored key {key} at {}", .path.display())]
    Io {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize saved schemas")]
    Serialize(#[from] serde_json::Error),
}
