//! Engine errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Unknown difficulty name or a degenerate grid
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
