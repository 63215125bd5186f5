//! Core error types

use thiserror::Error;

/// Errors raised while assembling credentials or handles
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

pub type Result<T> = std::result::Result<T, CloudError>;
