//! Error types for business-time operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusinessTimeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unparseable timestamp: {0}")]
    UnparseableTimestamp(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, BusinessTimeError>;
