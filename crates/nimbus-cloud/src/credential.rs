//! Access credentials
//!
//! A [`Credential`] is created once by the caller and handed to facade
//! constructors. The region may change over its lifetime; the keys may not.

use crate::error::{CloudError, Result};
use std::fmt;

const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY_ID";
const SECRET_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";
const REGION_VAR: &str = "AWS_REGION";
const DEFAULT_REGION_VAR: &str = "AWS_DEFAULT_REGION";

/// Access key pair plus the region handles are scoped to
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    access_key: String,
    secret_key: String,
    region: String,
}

impl Credential {
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: region.into(),
        }
    }

    /// Create a Credential from the standard AWS environment variables
    ///
    /// `AWS_REGION` wins over `AWS_DEFAULT_REGION` when both are set.
    pub fn from_env() -> Result<Self> {
        let access_key = require_var(ACCESS_KEY_VAR)?;
        let secret_key = require_var(SECRET_KEY_VAR)?;
        let region = std::env::var(REGION_VAR)
            .or_else(|_| std::env::var(DEFAULT_REGION_VAR))
            .map_err(|_| CloudError::MissingEnvVar(REGION_VAR.to_string()))?;

        Ok(Self::new(access_key, secret_key, region))
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Switch the region. Handles that were already built keep their region.
    pub fn set_region(&mut self, region: impl Into<String>) {
        self.region = region.into();
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

fn require_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| CloudError::MissingEnvVar(name.to_string()))
}
