//! Domain errors. Used by ports and adapters.
//!
//! The interpreter and analyzer never fail; only infrastructure does.
//! Adapters map their errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Record provider error: {0}")]
    Records(String),

    #[error("Speech recognition error: {0}")]
    Recognition(String),

    /// Speech recognition is not offered by this host.
    #[error("Speech recognition is not supported on this host")]
    RecognitionUnsupported,

    #[error("Input error: {0}")]
    Input(String),
}
