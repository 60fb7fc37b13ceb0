//! Error types for the material request pipeline.
//!
//! The pipeline itself never fails a whole batch: per-row and per-group
//! problems end up as status text on the rows. The errors here cover the
//! surrounding plumbing (configuration, connection setup, request validation)
//! and the failures reported by backend collaborators.

use crate::config::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatreqError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Unknown SAP system: {0}")]
    UnknownSystem(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Enrichment error: {0}")]
    Enrichment(String),
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

impl MatreqError {
    /// Text used after `Error: ` in a row status
    pub fn status_reason(&self) -> String {
        match self {
            MatreqError::Backend(error) => error.to_string(),
            MatreqError::InvalidInput(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type MatreqResult<T> = std::result::Result<T, MatreqError>;

/// Failures reported by a backend collaborator.
///
/// `Display` renders only the message so callers can put it straight into a
/// row status (`Error: <message>`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backend answered but rejected the call (severity E or A).
    #[error("{message}")]
    Rejected { message: String },
    /// The connection could not be opened or was lost mid-call.
    #[error("{0}")]
    Communication(String),
    /// Logon refused by the backend.
    #[error("{0}")]
    Logon(String),
    /// The response did not have the expected shape.
    #[error("{0}")]
    MalformedResponse(String),
}

impl BackendError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn communication(message: impl Into<String>) -> Self {
        Self::Communication(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;
