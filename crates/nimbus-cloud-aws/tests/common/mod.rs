use async_trait::async_trait;
use nimbus_cloud::{Connector, Credential};
use nimbus_cloud_aws::response::{
    InstancePage, RawAddress, RawPrivateIpAddress, RawReservedInstance,
};
use nimbus_cloud_aws::{
    AwsError, Ec2Api, Filter, NetworkInterfaceResource, ObjectApi, ObjectResource,
    ResponseMetadata, Result,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Simulated EC2 account shared by every handle a connector builds
pub struct Ec2State {
    /// Page N is served for token `page-N` (no token serves page 0)
    pub pages: Vec<InstancePage>,
    pub reserved: Vec<RawReservedInstance>,
    pub addresses: Vec<RawAddress>,
    pub interfaces: HashMap<String, Vec<RawPrivateIpAddress>>,
    pub allocated: RawAddress,
    /// HTTP status reported for mutations
    pub status: u16,
    /// `(operation, region)` for every call, in order
    pub calls: Vec<(String, String)>,
    pub filters: Vec<Vec<Filter>>,
}

impl Default for Ec2State {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            reserved: Vec::new(),
            addresses: Vec::new(),
            interfaces: HashMap::new(),
            allocated: RawAddress::default(),
            status: 200,
            calls: Vec::new(),
            filters: Vec::new(),
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeEc2Connector {
    pub state: Arc<Mutex<Ec2State>>,
}

impl FakeEc2Connector {
    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl Connector for FakeEc2Connector {
    type Client = FakeEc2;
    type Resource = FakeEc2;

    fn service_name(&self) -> &'static str {
        "ec2"
    }

    fn client(&self, credential: &Credential) -> FakeEc2 {
        FakeEc2 {
            state: Arc::clone(&self.state),
            region: credential.region().to_string(),
        }
    }

    fn resource(&self, credential: &Credential) -> FakeEc2 {
        self.client(credential)
    }
}

pub struct FakeEc2 {
    state: Arc<Mutex<Ec2State>>,
    region: String,
}

impl FakeEc2 {
    fn record(&self, operation: &str) -> std::sync::MutexGuard<'_, Ec2State> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((operation.to_string(), self.region.clone()));
        state
    }

    fn mutation(&self, operation: &str) -> Result<ResponseMetadata> {
        let state = self.record(operation);
        Ok(ResponseMetadata::new(state.status))
    }
}

#[async_trait]
impl Ec2Api for FakeEc2 {
    async fn describe_instances(
        &self,
        filters: &[Filter],
        next_token: Option<String>,
    ) -> Result<InstancePage> {
        let mut state = self.record("DescribeInstances");
        state.filters.push(filters.to_vec());

        let index = match next_token {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| AwsError::api("DescribeInstances", format!("bad token {token}")))?,
        };
        Ok(state.pages.get(index).cloned().unwrap_or_default())
    }

    async fn describe_reserved_instances(
        &self,
        filters: &[Filter],
    ) -> Result<Vec<RawReservedInstance>> {
        let mut state = self.record("DescribeReservedInstances");
        state.filters.push(filters.to_vec());
        Ok(state.reserved.clone())
    }

    async fn describe_addresses(&self) -> Result<Vec<RawAddress>> {
        Ok(self.record("DescribeAddresses").addresses.clone())
    }

    async fn disassociate_address(&self, _association_id: &str) -> Result<ResponseMetadata> {
        self.mutation("DisassociateAddress")
    }

    async fn release_address(&self, _allocation_id: &str) -> Result<ResponseMetadata> {
        self.mutation("ReleaseAddress")
    }

    async fn allocate_address(&self) -> Result<RawAddress> {
        Ok(self.record("AllocateAddress").allocated.clone())
    }

    async fn associate_address(
        &self,
        _allocation_id: &str,
        _network_interface_id: &str,
        _private_ip_address: &str,
    ) -> Result<ResponseMetadata> {
        self.mutation("AssociateAddress")
    }
}

#[async_trait]
impl NetworkInterfaceResource for FakeEc2 {
    async fn private_ip_addresses(&self, interface_id: &str) -> Result<Vec<RawPrivateIpAddress>> {
        let state = self.record("DescribeNetworkInterfaces");
        state
            .interfaces
            .get(interface_id)
            .cloned()
            .ok_or_else(|| AwsError::api("DescribeNetworkInterfaces", "InvalidNetworkInterfaceID.NotFound"))
    }

    async fn assign_private_ip_addresses(
        &self,
        _interface_id: &str,
        _count: i32,
    ) -> Result<ResponseMetadata> {
        self.mutation("AssignPrivateIpAddresses")
    }
}

/// Simulated object store keyed by `(bucket, key)`
#[derive(Default)]
pub struct S3State {
    pub objects: HashMap<(String, String), Vec<u8>>,
    /// Every read fails with a transport error when set
    pub unreachable: bool,
}

#[derive(Clone, Default)]
pub struct FakeS3Connector {
    pub state: Arc<Mutex<S3State>>,
}

impl FakeS3Connector {
    #[allow(dead_code)]
    pub fn insert(&self, bucket: &str, key: &str, body: &[u8]) {
        self.state
            .lock()
            .unwrap()
            .objects
            .insert((bucket.to_string(), key.to_string()), body.to_vec());
    }

    #[allow(dead_code)]
    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.state
            .lock()
            .unwrap()
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }
}

impl Connector for FakeS3Connector {
    type Client = FakeS3;
    type Resource = FakeS3;

    fn service_name(&self) -> &'static str {
        "s3"
    }

    fn client(&self, _credential: &Credential) -> FakeS3 {
        FakeS3 {
            state: Arc::clone(&self.state),
        }
    }

    fn resource(&self, credential: &Credential) -> FakeS3 {
        self.client(credential)
    }
}

pub struct FakeS3 {
    state: Arc<Mutex<S3State>>,
}

impl FakeS3 {
    fn store(&self, bucket: &str, key: &str, body: Vec<u8>) {
        self.state
            .lock()
            .unwrap()
            .objects
            .insert((bucket.to_string(), key.to_string()), body);
    }
}

#[async_trait]
impl ObjectApi for FakeS3 {
    async fn upload_file(&self, bucket: &str, key: &str, path: &Path) -> Result<()> {
        let body = std::fs::read(path)?;
        self.store(bucket, key, body);
        Ok(())
    }

    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()> {
        self.store(bucket, key, body);
        Ok(())
    }
}

#[async_trait]
impl ObjectResource for FakeS3 {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>> {
        let state = self.state.lock().unwrap();
        if state.unreachable {
            return Err(AwsError::api("GetObject", "dispatch failure: connection refused"));
        }
        Ok(state
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned())
    }
}

#[allow(dead_code)]
pub fn credential(region: &str) -> Credential {
    Credential::new("AKIATEST", "test-secret", region)
}
