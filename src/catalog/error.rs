use crate::record::QuestionId;
use thiserror::Error;

/// Caller-facing catalog failures. None of these are retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("question '{0}' already exists; use replace to update it")]
    DuplicateId(QuestionId),

    #[error("question '{0}' not found")]
    NotFound(QuestionId),

    #[error("invalid filter field '{field}': {reason}")]
    InvalidFilter { field: &'static str, reason: String },
}

impl CatalogError {
    pub(crate) fn invalid_filter(field: &'static str, reason: impl Into<String>) -> Self {
        CatalogError::InvalidFilter {
            field,
            reason: reason.into(),
        }
    }
}
