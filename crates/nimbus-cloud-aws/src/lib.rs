//! Nimbus AWS Provider
//!
//! EC2 and S3 facades built on the official AWS SDK for Rust.
//!
//! Each facade is generic over a [`nimbus_cloud::Connector`]. The default
//! connectors in [`sdk`] talk to AWS; tests plug in in-memory ones that
//! implement [`Ec2Api`] / [`NetworkInterfaceResource`] or [`ObjectApi`] /
//! [`ObjectResource`].
//!
//! ```text
//!  Ec2 / S3 facade ──▶ Handles<C> ──▶ C::Client / C::Resource
//!        │                                   │
//!        ▼                                   ▼
//!  records (Instance, …)  ◀── parse ── response (Raw*, ResponseMetadata)
//! ```

pub mod ec2;
pub mod error;
pub mod records;
pub mod response;
pub mod s3;
pub mod sdk;

pub use ec2::{Ec2, Ec2Api, NetDetails, NetworkInterfaceResource};
pub use error::{AwsError, Result};
pub use records::{Disk, ElasticIp, Endpoint, Instance, NetDetail, Network, ReservedInstance};
pub use response::{Filter, ResponseMetadata};
pub use s3::{ObjectApi, ObjectResource, S3};
pub use sdk::{Ec2Connector, S3Connector};
