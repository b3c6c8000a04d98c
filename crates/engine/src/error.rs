//! Engine-level error types.
//!
//! Structural validation problems are not errors here: the simulator reports
//! them as data in `SimulationResult::errors`. These types cover the
//! transport tier around it.

use thiserror::Error;

/// Message shown to a user whose workflow document could not be loaded.
pub const INVALID_DOCUMENT_MESSAGE: &str = "Invalid workflow file";

/// Message recorded on a run whose simulation request never produced a result.
pub const RUN_FAILED_MESSAGE: &str = "Failed to simulate workflow. Please try again.";

/// Errors produced while importing or exporting a workflow document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document is not a well-formed workflow.
    #[error("invalid workflow document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading or writing the document failed.
    #[error("workflow document I/O failed for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    /// The single message surfaced to the user, without parser internals.
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(_) => INVALID_DOCUMENT_MESSAGE.to_owned(),
            Self::Io { path, .. } => format!("Could not access workflow file '{path}'"),
        }
    }
}

/// Errors produced by a simulation backend.
#[derive(Debug, Error, Clone)]
pub enum RunError {
    /// The request never reached the simulator or its reply was lost.
    #[error("simulation transport failed: {0}")]
    Transport(String),
}
