//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.
//! Every variant maps to exactly one HTTP status; the dispatcher converts
//! errors to response envelopes at the invocation boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("OpenAI API key not configured")]
    MissingApiKey,

    #[error("OpenAI API error: {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response from OpenAI: {0}")]
    UnexpectedResponse(String),
}

impl Error {
    /// Status code of the envelope this error is reported with.
    ///
    /// Upstream errors forward the provider's status verbatim; anything
    /// raised while building or executing the call collapses to 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation { .. } => 400,
            Error::MissingApiKey => 500,
            Error::Upstream { status, .. } => *status,
            Error::Http(_) => 500,
            Error::UnexpectedResponse(_) => 500,
        }
    }

    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
