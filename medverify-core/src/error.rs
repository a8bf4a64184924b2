use thiserror::Error;

use crate::client::ClientError;

/// Message shown when a submission is rejected for empty input.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a URL or text to verify.";

/// Message shown for every transport, status or decode failure.
pub const CONNECTION_MESSAGE: &str = "Failed to connect to the backend. Is the server running?";

#[derive(Error, Debug)]
pub enum MedVerifyError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

/// Outcome of a rejected or failed submission.
///
/// `Display` yields the exact text the dashboard shows; the underlying
/// cause of a connection failure is only reachable through `source()`.
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("{}", EMPTY_INPUT_MESSAGE)]
    EmptyInput,

    #[error("{}", CONNECTION_MESSAGE)]
    Connection(#[source] ClientError),

    /// A newer submission took over before this one finished.
    #[error("submission superseded by a newer request")]
    Superseded,

    #[error("no example query at index {index} (have {available})")]
    UnknownExample { index: usize, available: usize },
}

impl VerifyError {
    /// The user-facing error kinds that end up in the state container.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            VerifyError::EmptyInput | VerifyError::UnknownExample { .. } => {
                Some(ErrorKind::Validation)
            }
            VerifyError::Connection(_) => Some(ErrorKind::Connection),
            VerifyError::Superseded => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Connection,
}
