use thiserror::Error;

/// Errors produced when parsing model values from their wire names.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown media type: {0}")]
    UnknownMediaType(String),
    #[error("unknown resource kind: {0}")]
    UnknownResourceKind(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
