//! SDK-backed connectors
//!
//! [`Ec2Connector`] and [`S3Connector`] build `aws-sdk-*` clients from a
//! [`Credential`] and translate SDK output into the raw response types of
//! [`crate::response`]. Building a client never touches the network.

use crate::ec2::{Ec2Api, NetworkInterfaceResource};
use crate::error::{AwsError, Result};
use crate::response::{
    Filter, InstancePage, RawAddress, RawAssociation, RawBlockDeviceMapping, RawEbs, RawInstance,
    RawInstanceState, RawNetworkInterface, RawPlacement, RawPrivateIpAddress, RawReservation,
    RawReservedInstance, RawTag, ResponseMetadata,
};
use crate::s3::{ObjectApi, ObjectResource};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_sdk_ec2::types as ec2_types;
use aws_sdk_s3::primitives::ByteStream;
use chrono::{DateTime, Utc};
use nimbus_cloud::{Connector, Credential};
use std::path::Path;

const PROVIDER_NAME: &str = "nimbus";

/// The SDK only reports failures as errors; an accepted call is a 200
const ACCEPTED: u16 = 200;

/// Build a static-credential SDK configuration scoped to the credential's region
pub fn sdk_config(credential: &Credential) -> SdkConfig {
    let credentials = Credentials::new(
        credential.access_key(),
        credential.secret_key(),
        None,
        None,
        PROVIDER_NAME,
    );

    SdkConfig::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(credential.region().to_string()))
        .credentials_provider(SharedCredentialsProvider::new(credentials))
        .build()
}

fn timestamp(value: Option<&aws_sdk_ec2::primitives::DateTime>) -> Option<DateTime<Utc>> {
    value.and_then(|dt| DateTime::from_timestamp(dt.secs(), dt.subsec_nanos()))
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

fn sdk_filters(filters: &[Filter]) -> Option<Vec<ec2_types::Filter>> {
    if filters.is_empty() {
        return None;
    }

    Some(
        filters
            .iter()
            .map(|filter| {
                ec2_types::Filter::builder()
                    .name(&filter.name)
                    .set_values(Some(filter.values.clone()))
                    .build()
            })
            .collect(),
    )
}

// --- EC2 ---

/// Connector for the compute service
#[derive(Debug, Clone, Copy, Default)]
pub struct Ec2Connector;

impl Connector for Ec2Connector {
    type Client = SdkEc2Client;
    type Resource = SdkNetworkInterfaces;

    fn service_name(&self) -> &'static str {
        "ec2"
    }

    fn client(&self, credential: &Credential) -> SdkEc2Client {
        SdkEc2Client {
            inner: aws_sdk_ec2::Client::new(&sdk_config(credential)),
        }
    }

    fn resource(&self, credential: &Credential) -> SdkNetworkInterfaces {
        SdkNetworkInterfaces {
            inner: aws_sdk_ec2::Client::new(&sdk_config(credential)),
        }
    }
}

/// EC2 call handle
#[derive(Debug, Clone)]
pub struct SdkEc2Client {
    inner: aws_sdk_ec2::Client,
}

#[async_trait]
impl Ec2Api for SdkEc2Client {
    async fn describe_instances(
        &self,
        filters: &[Filter],
        next_token: Option<String>,
    ) -> Result<InstancePage> {
        let output = self
            .inner
            .describe_instances()
            .set_filters(sdk_filters(filters))
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| AwsError::api("DescribeInstances", e))?;

        Ok(InstancePage {
            reservations: output
                .reservations()
                .iter()
                .map(|reservation| RawReservation {
                    instances: reservation.instances().iter().map(RawInstance::from).collect(),
                })
                .collect(),
            next_token: owned(output.next_token()),
        })
    }

    async fn describe_reserved_instances(
        &self,
        filters: &[Filter],
    ) -> Result<Vec<RawReservedInstance>> {
        let output = self
            .inner
            .describe_reserved_instances()
            .set_filters(sdk_filters(filters))
            .send()
            .await
            .map_err(|e| AwsError::api("DescribeReservedInstances", e))?;

        Ok(output
            .reserved_instances()
            .iter()
            .map(RawReservedInstance::from)
            .collect())
    }

    async fn describe_addresses(&self) -> Result<Vec<RawAddress>> {
        let output = self
            .inner
            .describe_addresses()
            .send()
            .await
            .map_err(|e| AwsError::api("DescribeAddresses", e))?;

        Ok(output.addresses().iter().map(RawAddress::from).collect())
    }

    async fn disassociate_address(&self, association_id: &str) -> Result<ResponseMetadata> {
        self.inner
            .disassociate_address()
            .association_id(association_id)
            .send()
            .await
            .map_err(|e| AwsError::api("DisassociateAddress", e))?;

        Ok(ResponseMetadata::new(ACCEPTED))
    }

    async fn release_address(&self, allocation_id: &str) -> Result<ResponseMetadata> {
        self.inner
            .release_address()
            .allocation_id(allocation_id)
            .send()
            .await
            .map_err(|e| AwsError::api("ReleaseAddress", e))?;

        Ok(ResponseMetadata::new(ACCEPTED))
    }

    async fn allocate_address(&self) -> Result<RawAddress> {
        let output = self
            .inner
            .allocate_address()
            .domain(ec2_types::DomainType::Vpc)
            .send()
            .await
            .map_err(|e| AwsError::api("AllocateAddress", e))?;

        Ok(RawAddress {
            public_ip: owned(output.public_ip()),
            allocation_id: owned(output.allocation_id()),
            ..Default::default()
        })
    }

    async fn associate_address(
        &self,
        allocation_id: &str,
        network_interface_id: &str,
        private_ip_address: &str,
    ) -> Result<ResponseMetadata> {
        self.inner
            .associate_address()
            .allocation_id(allocation_id)
            .network_interface_id(network_interface_id)
            .private_ip_address(private_ip_address)
            .send()
            .await
            .map_err(|e| AwsError::api("AssociateAddress", e))?;

        Ok(ResponseMetadata::new(ACCEPTED))
    }
}

/// EC2 resource handle for network interfaces
#[derive(Debug, Clone)]
pub struct SdkNetworkInterfaces {
    inner: aws_sdk_ec2::Client,
}

#[async_trait]
impl NetworkInterfaceResource for SdkNetworkInterfaces {
    async fn private_ip_addresses(&self, interface_id: &str) -> Result<Vec<RawPrivateIpAddress>> {
        let output = self
            .inner
            .describe_network_interfaces()
            .network_interface_ids(interface_id)
            .send()
            .await
            .map_err(|e| AwsError::api("DescribeNetworkInterfaces", e))?;

        Ok(output
            .network_interfaces()
            .iter()
            .flat_map(|interface| interface.private_ip_addresses())
            .map(RawPrivateIpAddress::from)
            .collect())
    }

    async fn assign_private_ip_addresses(
        &self,
        interface_id: &str,
        count: i32,
    ) -> Result<ResponseMetadata> {
        self.inner
            .assign_private_ip_addresses()
            .network_interface_id(interface_id)
            .secondary_private_ip_address_count(count)
            .send()
            .await
            .map_err(|e| AwsError::api("AssignPrivateIpAddresses", e))?;

        Ok(ResponseMetadata::new(ACCEPTED))
    }
}

impl From<&ec2_types::Instance> for RawInstance {
    fn from(instance: &ec2_types::Instance) -> Self {
        Self {
            instance_id: owned(instance.instance_id()),
            instance_type: instance.instance_type().map(|t| t.as_str().to_string()),
            image_id: owned(instance.image_id()),
            placement: instance.placement().map(|placement| RawPlacement {
                availability_zone: owned(placement.availability_zone()),
            }),
            launch_time: timestamp(instance.launch_time()),
            state: instance.state().map(|state| RawInstanceState {
                code: state.code(),
                name: state.name().map(|name| name.as_str().to_string()),
            }),
            key_name: owned(instance.key_name()),
            vpc_id: owned(instance.vpc_id()),
            tags: instance
                .tags()
                .iter()
                .map(|tag| RawTag {
                    key: owned(tag.key()),
                    value: owned(tag.value()),
                })
                .collect(),
            block_device_mappings: instance
                .block_device_mappings()
                .iter()
                .map(|mapping| RawBlockDeviceMapping {
                    device_name: owned(mapping.device_name()),
                    ebs: mapping.ebs().map(|ebs| RawEbs {
                        attach_time: timestamp(ebs.attach_time()),
                        volume_id: owned(ebs.volume_id()),
                    }),
                })
                .collect(),
            network_interfaces: instance
                .network_interfaces()
                .iter()
                .map(|interface| RawNetworkInterface {
                    network_interface_id: owned(interface.network_interface_id()),
                    private_ip_addresses: interface
                        .private_ip_addresses()
                        .iter()
                        .map(|address| RawPrivateIpAddress {
                            private_ip_address: owned(address.private_ip_address()),
                            private_dns_name: owned(address.private_dns_name()),
                            primary: address.primary(),
                            association: address.association().map(|association| {
                                RawAssociation {
                                    public_ip: owned(association.public_ip()),
                                    public_dns_name: owned(association.public_dns_name()),
                                    ..Default::default()
                                }
                            }),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl From<&ec2_types::NetworkInterfacePrivateIpAddress> for RawPrivateIpAddress {
    fn from(address: &ec2_types::NetworkInterfacePrivateIpAddress) -> Self {
        Self {
            private_ip_address: owned(address.private_ip_address()),
            private_dns_name: owned(address.private_dns_name()),
            primary: address.primary(),
            association: address.association().map(|association| RawAssociation {
                public_ip: owned(association.public_ip()),
                public_dns_name: owned(association.public_dns_name()),
                association_id: owned(association.association_id()),
                allocation_id: owned(association.allocation_id()),
            }),
        }
    }
}

impl From<&ec2_types::ReservedInstances> for RawReservedInstance {
    fn from(reserved: &ec2_types::ReservedInstances) -> Self {
        Self {
            reserved_instances_id: owned(reserved.reserved_instances_id()),
            start: timestamp(reserved.start()),
            end: timestamp(reserved.end()),
            instance_count: reserved.instance_count(),
            instance_type: reserved.instance_type().map(|t| t.as_str().to_string()),
            product_description: reserved
                .product_description()
                .map(|description| description.as_str().to_string()),
            state: reserved.state().map(|state| state.as_str().to_string()),
            duration: reserved.duration(),
        }
    }
}

impl From<&ec2_types::Address> for RawAddress {
    fn from(address: &ec2_types::Address) -> Self {
        Self {
            public_ip: owned(address.public_ip()),
            allocation_id: owned(address.allocation_id()),
            association_id: owned(address.association_id()),
            network_interface_id: owned(address.network_interface_id()),
            private_ip_address: owned(address.private_ip_address()),
            instance_id: owned(address.instance_id()),
        }
    }
}

// --- S3 ---

/// Connector for the object storage service
#[derive(Debug, Clone, Copy, Default)]
pub struct S3Connector;

impl Connector for S3Connector {
    type Client = SdkObjectClient;
    type Resource = SdkObjectResource;

    fn service_name(&self) -> &'static str {
        "s3"
    }

    fn client(&self, credential: &Credential) -> SdkObjectClient {
        SdkObjectClient {
            inner: aws_sdk_s3::Client::new(&sdk_config(credential)),
        }
    }

    fn resource(&self, credential: &Credential) -> SdkObjectResource {
        SdkObjectResource {
            inner: aws_sdk_s3::Client::new(&sdk_config(credential)),
        }
    }
}

/// S3 call handle
#[derive(Debug, Clone)]
pub struct SdkObjectClient {
    inner: aws_sdk_s3::Client,
}

#[async_trait]
impl ObjectApi for SdkObjectClient {
    async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        // Local read failures surface as Io, before any request is made
        let file = tokio::fs::File::open(path).await?;
        let body = ByteStream::read_from()
            .file(file)
            .build()
            .await
            .map_err(|e| AwsError::api("PutObject", e))?;

        self.inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| AwsError::api("PutObject", e))?;

        Ok(())
    }

    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        self.inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| AwsError::api("PutObject", e))?;

        Ok(())
    }
}

/// S3 resource handle for objects
#[derive(Debug, Clone)]
pub struct SdkObjectResource {
    inner: aws_sdk_s3::Client,
}

#[async_trait]
impl ObjectResource for SdkObjectResource {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>> {
        let output = match self.inner.get_object().bucket(bucket).key(key).send().await {
            Ok(output) => output,
            Err(err) => {
                let missing = err
                    .as_service_error()
                    .map(|e| e.is_no_such_key())
                    .unwrap_or(false);
                if missing {
                    return Ok(None);
                }
                return Err(AwsError::api("GetObject", err));
            }
        };

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| AwsError::api("GetObject", e))?;

        Ok(Some(body.into_bytes().to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_config_scoped_to_region() {
        let credential = Credential::new("AKIA", "secret", "ap-northeast-2");
        let config = sdk_config(&credential);

        assert_eq!(config.region().map(|r| r.as_ref()), Some("ap-northeast-2"));
        assert!(config.credentials_provider().is_some());
    }

    #[tokio::test]
    async fn test_upload_missing_local_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = S3Connector.client(&Credential::new("AKIA", "secret", "ap-northeast-2"));

        let result = client
            .upload_file("nimbus-test", "missing.txt", &dir.path().join("missing.txt"))
            .await;

        assert!(matches!(result, Err(AwsError::Io(_))));
    }

    #[test]
    fn test_empty_filters_are_omitted() {
        assert!(sdk_filters(&[]).is_none());

        let filters = sdk_filters(&[Filter::new("state", ["active"])]).unwrap();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].name(), Some("state"));
        assert_eq!(filters[0].values(), ["active".to_string()]);
    }

    #[test]
    fn test_address_conversion() {
        let address = ec2_types::Address::builder()
            .public_ip("203.0.113.10")
            .allocation_id("eipalloc-1")
            .network_interface_id("eni-1")
            .build();

        let raw = RawAddress::from(&address);
        assert_eq!(raw.public_ip.as_deref(), Some("203.0.113.10"));
        assert_eq!(raw.allocation_id.as_deref(), Some("eipalloc-1"));
        assert_eq!(raw.network_interface_id.as_deref(), Some("eni-1"));
        assert!(raw.association_id.is_none());
    }

    #[test]
    fn test_instance_conversion() {
        let instance = ec2_types::Instance::builder()
            .instance_id("i-0abc")
            .instance_type(ec2_types::InstanceType::T3Micro)
            .tags(ec2_types::Tag::builder().key("Name").value("web").build())
            .launch_time(aws_sdk_ec2::primitives::DateTime::from_secs(1_700_000_000))
            .build();

        let raw = RawInstance::from(&instance);
        assert_eq!(raw.instance_id.as_deref(), Some("i-0abc"));
        assert_eq!(raw.instance_type.as_deref(), Some("t3.micro"));
        assert_eq!(raw.tags[0].value.as_deref(), Some("web"));
        assert_eq!(raw.launch_time.map(|t| t.timestamp()), Some(1_700_000_000));
        assert!(raw.network_interfaces.is_empty());
    }
}
