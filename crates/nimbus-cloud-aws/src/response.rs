//! Raw provider responses
//!
//! These types mirror the provider's JSON documents (PascalCase keys) field
//! for field. Every field is optional or defaulted, exactly like the wire
//! format; deciding what is required happens in [`crate::records`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-side filter (`Filter.N.Name` / `Filter.N.Value.M`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Filter {
    pub name: String,
    pub values: Vec<String>,
}

impl Filter {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Transport-level outcome of a mutation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(rename = "HTTPStatusCode")]
    pub http_status_code: u16,
}

impl ResponseMetadata {
    pub fn new(http_status_code: u16) -> Self {
        Self { http_status_code }
    }

    /// Success means HTTP 200, nothing more
    pub fn is_success(&self) -> bool {
        self.http_status_code == 200
    }
}

/// One page of `DescribeInstances`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstancePage {
    #[serde(default)]
    pub reservations: Vec<RawReservation>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawReservation {
    #[serde(default)]
    pub instances: Vec<RawInstance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawInstance {
    pub instance_id: Option<String>,
    pub instance_type: Option<String>,
    pub image_id: Option<String>,
    pub placement: Option<RawPlacement>,
    pub launch_time: Option<DateTime<Utc>>,
    pub state: Option<RawInstanceState>,
    pub key_name: Option<String>,
    pub vpc_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<RawTag>,
    #[serde(default)]
    pub block_device_mappings: Vec<RawBlockDeviceMapping>,
    #[serde(default)]
    pub network_interfaces: Vec<RawNetworkInterface>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawPlacement {
    pub availability_zone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawInstanceState {
    pub code: Option<i32>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawTag {
    pub key: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawBlockDeviceMapping {
    pub device_name: Option<String>,
    pub ebs: Option<RawEbs>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawEbs {
    pub attach_time: Option<DateTime<Utc>>,
    pub volume_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawNetworkInterface {
    pub network_interface_id: Option<String>,
    #[serde(default)]
    pub private_ip_addresses: Vec<RawPrivateIpAddress>,
}

/// Private address entry, shared by instance interfaces and
/// `DescribeNetworkInterfaces`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawPrivateIpAddress {
    pub private_ip_address: Option<String>,
    pub private_dns_name: Option<String>,
    pub primary: Option<bool>,
    pub association: Option<RawAssociation>,
}

/// Public (elastic or auto-assigned) address associated with a private one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawAssociation {
    pub public_ip: Option<String>,
    pub public_dns_name: Option<String>,
    pub association_id: Option<String>,
    pub allocation_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawReservedInstance {
    pub reserved_instances_id: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub instance_count: Option<i32>,
    pub instance_type: Option<String>,
    pub product_description: Option<String>,
    pub state: Option<String>,
    pub duration: Option<i64>,
}

/// `DescribeAddresses` entry, also the shape of `AllocateAddress` output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawAddress {
    pub public_ip: Option<String>,
    pub allocation_id: Option<String>,
    pub association_id: Option<String>,
    pub network_interface_id: Option<String>,
    pub private_ip_address: Option<String>,
    pub instance_id: Option<String>,
}
