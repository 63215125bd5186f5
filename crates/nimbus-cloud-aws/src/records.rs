//! Parsed records
//!
//! Each record is an immutable projection of exactly one raw response item.
//! Records never call back into the provider.

use crate::error::{AwsError, Result};
use crate::response::{
    RawAddress, RawBlockDeviceMapping, RawInstance, RawNetworkInterface, RawPrivateIpAddress,
    RawReservedInstance, RawTag,
};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

const NAME_TAG: &str = "Name";

fn required<T>(value: Option<T>, record: &'static str, field: &'static str) -> Result<T> {
    value.ok_or(AwsError::MissingField { record, field })
}

/// Compute instance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instance {
    id: String,
    name: Option<String>,
    instance_type: String,
    image_id: String,
    availability_zone: String,
    launch_time: DateTime<Utc>,
    state: String,
    key_pair: Option<String>,
    vpc_id: Option<String>,
    disks: Vec<Disk>,
    networks: Vec<Network>,
}

impl Instance {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Value of the first `Name` tag, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn instance_type(&self) -> &str {
        &self.instance_type
    }

    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    pub fn availability_zone(&self) -> &str {
        &self.availability_zone
    }

    pub fn launch_time(&self) -> DateTime<Utc> {
        self.launch_time
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn key_pair(&self) -> Option<&str> {
        self.key_pair.as_deref()
    }

    pub fn vpc_id(&self) -> Option<&str> {
        self.vpc_id.as_deref()
    }

    pub fn disks(&self) -> &[Disk] {
        &self.disks
    }

    /// One entry per private address of every attached interface
    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    pub fn is_running(&self) -> bool {
        self.state == "running"
    }
}

impl TryFrom<RawInstance> for Instance {
    type Error = AwsError;

    fn try_from(raw: RawInstance) -> Result<Self> {
        const RECORD: &str = "Instance";

        let disks = raw
            .block_device_mappings
            .into_iter()
            .map(Disk::try_from)
            .collect::<Result<Vec<_>>>()?;

        let mut networks = Vec::new();
        for interface in raw.network_interfaces {
            networks.extend(Network::from_interface(interface)?);
        }

        Ok(Self {
            id: required(raw.instance_id, RECORD, "InstanceId")?,
            name: name_tag(&raw.tags),
            instance_type: required(raw.instance_type, RECORD, "InstanceType")?,
            image_id: required(raw.image_id, RECORD, "ImageId")?,
            availability_zone: required(
                raw.placement.and_then(|p| p.availability_zone),
                RECORD,
                "Placement.AvailabilityZone",
            )?,
            launch_time: required(raw.launch_time, RECORD, "LaunchTime")?,
            state: required(raw.state.and_then(|s| s.name), RECORD, "State.Name")?,
            key_pair: raw.key_name,
            vpc_id: raw.vpc_id,
            disks,
            networks,
        })
    }
}

fn name_tag(tags: &[RawTag]) -> Option<String> {
    tags.iter()
        .find(|tag| tag.key.as_deref() == Some(NAME_TAG))
        .and_then(|tag| tag.value.clone())
}

/// EBS volume attached to an instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disk {
    pub device_name: String,
    pub attach_time: DateTime<Utc>,
    pub volume_id: String,
}

impl TryFrom<RawBlockDeviceMapping> for Disk {
    type Error = AwsError;

    fn try_from(raw: RawBlockDeviceMapping) -> Result<Self> {
        const RECORD: &str = "Disk";

        let ebs = required(raw.ebs, RECORD, "Ebs")?;
        Ok(Self {
            device_name: required(raw.device_name, RECORD, "DeviceName")?,
            attach_time: required(ebs.attach_time, RECORD, "Ebs.AttachTime")?,
            volume_id: required(ebs.volume_id, RECORD, "Ebs.VolumeId")?,
        })
    }
}

/// Address and DNS name pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub ip: String,
    /// Empty when the provider assigns no DNS name
    pub dns_name: String,
}

/// One private address of a network interface and its public counterpart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Network {
    pub interface_id: String,
    pub private: Endpoint,
    pub public: Option<Endpoint>,
}

impl Network {
    fn from_interface(interface: RawNetworkInterface) -> Result<Vec<Self>> {
        const RECORD: &str = "Network";

        let interface_id = required(interface.network_interface_id, RECORD, "NetworkInterfaceId")?;
        let networks = interface
            .private_ip_addresses
            .into_iter()
            .filter_map(|address| {
                // Entries without a private address are skipped
                let Some(ip) = address.private_ip_address else {
                    tracing::debug!(
                        "Skipping address entry without PrivateIpAddress on {}",
                        interface_id
                    );
                    return None;
                };
                let private = Endpoint {
                    ip,
                    dns_name: address.private_dns_name.unwrap_or_default(),
                };
                // No public association is normal for private-only addresses
                let public = address.association.and_then(|association| {
                    Some(Endpoint {
                        ip: association.public_ip?,
                        dns_name: association.public_dns_name.unwrap_or_default(),
                    })
                });

                Some(Self {
                    interface_id: interface_id.clone(),
                    private,
                    public,
                })
            })
            .collect();

        Ok(networks)
    }
}

/// Reserved-instance purchase, tagged with the region it was listed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservedInstance {
    id: String,
    start_time: DateTime<Utc>,
    expire_time: DateTime<Utc>,
    count: i32,
    instance_type: String,
    description: String,
    state: String,
    duration: i64,
    region: String,
}

impl ReservedInstance {
    pub fn parse(raw: RawReservedInstance, region: impl Into<String>) -> Result<Self> {
        const RECORD: &str = "ReservedInstance";

        Ok(Self {
            id: required(raw.reserved_instances_id, RECORD, "ReservedInstancesId")?,
            start_time: required(raw.start, RECORD, "Start")?,
            expire_time: required(raw.end, RECORD, "End")?,
            count: required(raw.instance_count, RECORD, "InstanceCount")?,
            instance_type: required(raw.instance_type, RECORD, "InstanceType")?,
            description: required(raw.product_description, RECORD, "ProductDescription")?,
            state: required(raw.state, RECORD, "State")?,
            duration: required(raw.duration, RECORD, "Duration")?,
            region: region.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn expire_time(&self) -> DateTime<Utc> {
        self.expire_time
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn instance_type(&self) -> &str {
        &self.instance_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    /// Term length in seconds
    pub fn duration(&self) -> i64 {
        self.duration
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Time left until the reservation expires; negative once expired
    pub fn remaining_time(&self) -> Duration {
        self.remaining_time_at(Utc::now())
    }

    /// Same as [`Self::remaining_time`] against a fixed clock
    pub fn remaining_time_at(&self, now: DateTime<Utc>) -> Duration {
        self.expire_time.naive_utc() - now.naive_utc()
    }
}

/// Elastic IP allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElasticIp {
    pub public_ip: String,
    pub allocation_id: String,
}

impl TryFrom<RawAddress> for ElasticIp {
    type Error = AwsError;

    fn try_from(raw: RawAddress) -> Result<Self> {
        const RECORD: &str = "ElasticIp";

        Ok(Self {
            public_ip: required(raw.public_ip, RECORD, "PublicIp")?,
            allocation_id: required(raw.allocation_id, RECORD, "AllocationId")?,
        })
    }
}

/// Elastic IP ids bound to one private address of an interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetDetail {
    pub association_id: Option<String>,
    pub allocation_id: Option<String>,
}

impl From<RawPrivateIpAddress> for NetDetail {
    fn from(raw: RawPrivateIpAddress) -> Self {
        match raw.association {
            Some(association) => Self {
                association_id: association.association_id,
                allocation_id: association.allocation_id,
            },
            None => Self::default(),
        }
    }
}
