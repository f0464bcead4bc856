use thiserror::Error;

use crate::config::messages;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("failed to encode liked ids: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("local storage rejected the write")]
    WriteRejected,
}

/// Contact form validation failure. The message is shown to the visitor as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{}", messages::MISSING_NAME)]
    MissingName,
    #[error("{}", messages::MISSING_PHONE)]
    MissingPhone,
}

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("lead request failed: {0}")]
    Transport(#[from] gloo_net::Error),
    #[error("lead rejected by server: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
}
