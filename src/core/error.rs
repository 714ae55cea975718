//! Engine errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkirmishError {
    #[error("Unit record has no usable name")]
    MissingName,

    #[error("Unit '{0}' has no usable capabilities")]
    NoCapabilities(String),

    #[error("Unit '{0}' cannot operate in {1} battles")]
    NoMobility(String, crate::core::types::Environment),

    #[error("Starting distance must be non-negative, got {0}")]
    NegativeDistance(f64),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Record error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SkirmishError>;
