//! Nimbus Cloud Core
//!
//! Provider-agnostic building blocks shared by every Nimbus provider crate:
//! the [`Credential`] a caller authenticates with, and the [`Connector`] /
//! [`Handles`] pair that turns a credential into authenticated service
//! handles.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   connect    ┌─────────────────────────────┐
//! │  Credential  │ ───────────▶ │         Handles<C>          │
//! │ (keys+region)│              │  region snapshot            │
//! └──────────────┘              │  C::Client   (call handle)  │
//!                               │  C::Resource (resource)     │
//!                               └──────────────┬──────────────┘
//!                                              │
//!                               ┌──────────────▼──────────────┐
//!                               │  provider facades (Ec2, S3) │
//!                               └─────────────────────────────┘
//! ```

pub mod credential;
pub mod error;
pub mod handles;

// Re-exports
pub use credential::Credential;
pub use error::{CloudError, Result};
pub use handles::{Connector, Handles};
