//! Compute facade
//!
//! [`Ec2`] wraps a call handle ([`Ec2Api`]) and a resource handle
//! ([`NetworkInterfaceResource`]) and exposes one method per supported
//! operation, returning parsed records.

use crate::error::{AwsError, Result};
use crate::records::{ElasticIp, Instance, NetDetail, ReservedInstance};
use crate::response::{
    Filter, InstancePage, RawAddress, RawInstance, RawPrivateIpAddress, RawReservedInstance,
    ResponseMetadata,
};
use crate::sdk::Ec2Connector;
use async_trait::async_trait;
use futures_util::{Stream, TryStreamExt, stream};
use nimbus_cloud::{Connector, Credential, Handles};

const INSTANCE_STATE_FILTER: &str = "instance-state-name";
const RESERVED_STATE_FILTER: &str = "state";

/// Low-level EC2 call interface, one method per API action
#[async_trait]
pub trait Ec2Api: Send + Sync {
    async fn describe_instances(
        &self,
        filters: &[Filter],
        next_token: Option<String>,
    ) -> Result<InstancePage>;

    async fn describe_reserved_instances(
        &self,
        filters: &[Filter],
    ) -> Result<Vec<RawReservedInstance>>;

    async fn describe_addresses(&self) -> Result<Vec<RawAddress>>;

    async fn disassociate_address(&self, association_id: &str) -> Result<ResponseMetadata>;

    async fn release_address(&self, allocation_id: &str) -> Result<ResponseMetadata>;

    /// Allocate a VPC-scoped address
    async fn allocate_address(&self) -> Result<RawAddress>;

    async fn associate_address(
        &self,
        allocation_id: &str,
        network_interface_id: &str,
        private_ip_address: &str,
    ) -> Result<ResponseMetadata>;
}

/// Operations addressed to a single network interface
#[async_trait]
pub trait NetworkInterfaceResource: Send + Sync {
    async fn private_ip_addresses(&self, interface_id: &str) -> Result<Vec<RawPrivateIpAddress>>;

    async fn assign_private_ip_addresses(
        &self,
        interface_id: &str,
        count: i32,
    ) -> Result<ResponseMetadata>;
}

/// Parses [`NetDetail`] records one at a time
pub struct NetDetails {
    addresses: std::vec::IntoIter<RawPrivateIpAddress>,
}

impl Iterator for NetDetails {
    type Item = NetDetail;

    fn next(&mut self) -> Option<NetDetail> {
        self.addresses.next().map(NetDetail::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.addresses.size_hint()
    }
}

enum Cursor {
    Start,
    Next(String),
    Done,
}

/// EC2 facade
pub struct Ec2<C: Connector = Ec2Connector> {
    handles: Handles<C>,
}

impl Ec2 {
    /// Build SDK-backed handles for the credential's keys and region
    pub fn new(credential: &Credential) -> Self {
        Self::with_connector(Ec2Connector, credential)
    }
}

impl<C> Ec2<C>
where
    C: Connector,
    C::Client: Ec2Api,
    C::Resource: NetworkInterfaceResource,
{
    pub fn with_connector(connector: C, credential: &Credential) -> Self {
        Self {
            handles: Handles::new(connector, credential),
        }
    }

    /// Region the handles were built for
    pub fn region(&self) -> &str {
        self.handles.region()
    }

    /// Rebuild both handles from a (possibly different) credential
    pub fn rebind(&mut self, credential: &Credential) {
        self.handles.rebind(credential);
    }

    pub fn handles(&self) -> &Handles<C> {
        &self.handles
    }

    /// Stream every instance, fetching pages as the stream is consumed
    ///
    /// With `running_only` the provider filters on `instance-state-name`.
    /// The stream walks one pagination cursor and cannot be restarted.
    pub fn instances(&self, running_only: bool) -> impl Stream<Item = Result<Instance>> + '_ {
        let filters = if running_only {
            vec![Filter::new(INSTANCE_STATE_FILTER, ["running"])]
        } else {
            Vec::new()
        };
        let client = self.handles.client();
        let region = self.handles.region();

        stream::try_unfold(Cursor::Start, move |cursor| {
            let filters = filters.clone();
            async move {
                let next_token = match cursor {
                    Cursor::Done => return Ok(None),
                    Cursor::Start => None,
                    Cursor::Next(token) => Some(token),
                };

                tracing::debug!("DescribeInstances in {} (token: {:?})", region, next_token);
                let page = client.describe_instances(&filters, next_token).await?;
                let next = page.next_token.map_or(Cursor::Done, Cursor::Next);
                let instances: Vec<RawInstance> = page
                    .reservations
                    .into_iter()
                    .flat_map(|reservation| reservation.instances)
                    .collect();

                Ok::<_, AwsError>(Some((instances, next)))
            }
        })
        .map_ok(|instances| stream::iter(instances.into_iter().map(Instance::try_from)))
        .try_flatten()
    }

    /// List reserved instances, tagging each with this facade's region
    pub async fn reserved_instances(&self, active_only: bool) -> Result<Vec<ReservedInstance>> {
        let filters = if active_only {
            vec![Filter::new(RESERVED_STATE_FILTER, ["active"])]
        } else {
            Vec::new()
        };

        tracing::debug!("DescribeReservedInstances in {}", self.region());
        self.handles
            .client()
            .describe_reserved_instances(&filters)
            .await?
            .into_iter()
            .map(|raw| ReservedInstance::parse(raw, self.region()))
            .collect()
    }

    /// Elastic IP ids bound to each private address of an interface
    pub async fn network_details(&self, interface_id: &str) -> Result<NetDetails> {
        tracing::debug!("Reading private addresses of {}", interface_id);
        let addresses = self
            .handles
            .resource()
            .private_ip_addresses(interface_id)
            .await?;

        Ok(NetDetails {
            addresses: addresses.into_iter(),
        })
    }

    /// List elastic IPs; `unattached_only` skips addresses bound to an interface
    pub async fn elastic_ips(&self, unattached_only: bool) -> Result<Vec<ElasticIp>> {
        tracing::debug!("DescribeAddresses in {}", self.region());
        self.handles
            .client()
            .describe_addresses()
            .await?
            .into_iter()
            .filter(|address| !(unattached_only && address.network_interface_id.is_some()))
            .map(ElasticIp::try_from)
            .collect()
    }

    pub async fn detach_elastic_ip(&self, association_id: &str) -> Result<bool> {
        tracing::debug!("DisassociateAddress {}", association_id);
        let response = self
            .handles
            .client()
            .disassociate_address(association_id)
            .await?;
        Ok(response.is_success())
    }

    pub async fn release_elastic_ip(&self, allocation_id: &str) -> Result<bool> {
        tracing::debug!("ReleaseAddress {}", allocation_id);
        let response = self.handles.client().release_address(allocation_id).await?;
        Ok(response.is_success())
    }

    pub async fn allocate_elastic_ip(&self) -> Result<ElasticIp> {
        tracing::debug!("AllocateAddress in {}", self.region());
        let address = self.handles.client().allocate_address().await?;
        ElasticIp::try_from(address)
    }

    pub async fn attach_elastic_ip(
        &self,
        interface_id: &str,
        allocation_id: &str,
        private_ip: &str,
    ) -> Result<bool> {
        tracing::debug!(
            "AssociateAddress {} -> {} ({})",
            allocation_id,
            interface_id,
            private_ip
        );
        let response = self
            .handles
            .client()
            .associate_address(allocation_id, interface_id, private_ip)
            .await?;
        Ok(response.is_success())
    }

    /// Request `count` additional private addresses on an interface
    pub async fn assign_private_ips(&self, count: i32, interface_id: &str) -> Result<bool> {
        tracing::debug!("AssignPrivateIpAddresses x{} on {}", count, interface_id);
        let response = self
            .handles
            .resource()
            .assign_private_ip_addresses(interface_id, count)
            .await?;
        Ok(response.is_success())
    }
}
