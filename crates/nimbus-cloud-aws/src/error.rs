//! AWS provider error types

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum AwsError {
    /// Transport, authentication or service error reported by the SDK
    #[error("{operation} failed: {source}")]
    Api {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("{record} is missing required field {field}")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cloud error: {0}")]
    Cloud(#[from] nimbus_cloud::CloudError),
}

impl AwsError {
    pub fn api(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Api {
            operation,
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AwsError>;
