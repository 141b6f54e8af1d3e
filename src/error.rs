//! Error types for the lease contract services
//!
//! The assembler itself is total and never fails. Everything around it
//! (storage, validation, backup, export) reports through [`LeaseError`].

use thiserror::Error;

use crate::store::Collection;

pub type Result<T> = std::result::Result<T, LeaseError>;

#[derive(Error, Debug)]
pub enum LeaseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{collection} record '{id}' not found")]
    NotFound { collection: Collection, id: String },

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The assembler produced no text (no template selected)
    #[error("Contract is not ready to render: {0}")]
    NotReady(String),

    #[error("Invalid backup: {0}")]
    InvalidBackup(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl LeaseError {
    pub fn not_found(collection: Collection, id: impl Into<String>) -> Self {
        LeaseError::NotFound {
            collection,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LeaseError::NotFound { .. })
    }
}

impl From<handlebars::RenderError> for LeaseError {
    fn from(err: handlebars::RenderError) -> Self {
        LeaseError::Render(err.to_string())
    }
}

impl From<handlebars::TemplateError> for LeaseError {
    fn from(err: handlebars::TemplateError) -> Self {
        LeaseError::Render(err.to_string())
    }
}
