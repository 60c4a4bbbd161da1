//! Core shared types and errors (geometry-agnostic).

pub use glam::{DVec3, dvec3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Invalid {name} '{value}': {reason}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("Unknown point precision '{0}' (expected single or double)")]
    UnknownPrecision(String),
    #[error("Generic error: {0}")]
    Generic(String),
}

impl CoreError {
    pub fn invalid(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidArgument {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
