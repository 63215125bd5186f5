//! Service handle factory
//!
//! Every facade owns a [`Handles`] value: a low-level call handle and a
//! resource handle, both built from the same credential snapshot.

use crate::credential::Credential;

/// Builds authenticated handles for one service
///
/// Implementations must not talk to the provider while building handles;
/// an invalid credential surfaces on the first call made through a handle.
pub trait Connector: Send + Sync {
    /// Low-level call interface (one method per provider API action)
    type Client: Send + Sync;

    /// Higher-level resource interface
    type Resource: Send + Sync;

    /// Returns the provider service name (e.g., "ec2", "s3")
    fn service_name(&self) -> &'static str;

    /// Build the call handle scoped to the credential's keys and region
    fn client(&self, credential: &Credential) -> Self::Client;

    /// Build the resource handle scoped to the credential's keys and region
    fn resource(&self, credential: &Credential) -> Self::Resource;
}

/// Call handle, resource handle and the region they were built for
pub struct Handles<C: Connector> {
    connector: C,
    region: String,
    client: C::Client,
    resource: C::Resource,
}

impl<C: Connector> Handles<C> {
    pub fn new(connector: C, credential: &Credential) -> Self {
        tracing::debug!(
            "Building {} handles for region {}",
            connector.service_name(),
            credential.region()
        );

        let client = connector.client(credential);
        let resource = connector.resource(credential);
        Self {
            region: credential.region().to_string(),
            connector,
            client,
            resource,
        }
    }

    /// Rebuild both handles from another credential (or the same one after a
    /// region change)
    pub fn rebind(&mut self, credential: &Credential) {
        tracing::debug!(
            "Rebinding {} handles: {} -> {}",
            self.connector.service_name(),
            self.region,
            credential.region()
        );

        self.region = credential.region().to_string();
        self.client = self.connector.client(credential);
        self.resource = self.connector.resource(credential);
    }

    /// Region recorded when the handles were last built
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn client(&self) -> &C::Client {
        &self.client
    }

    pub fn resource(&self) -> &C::Resource {
        &self.resource
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Handles that simply remember the region they were scoped to
    #[derive(Default)]
    struct RegionConnector {
        builds: AtomicUsize,
    }

    impl Connector for RegionConnector {
        type Client = String;
        type Resource = String;

        fn service_name(&self) -> &'static str {
            "test"
        }

        fn client(&self, credential: &Credential) -> String {
            self.builds.fetch_add(1, Ordering::SeqCst);
            format!("client@{}", credential.region())
        }

        fn resource(&self, credential: &Credential) -> String {
            self.builds.fetch_add(1, Ordering::SeqCst);
            format!("resource@{}", credential.region())
        }
    }

    #[test]
    fn test_handles_scoped_to_region() {
        let credential = Credential::new("AKIA", "secret", "ap-northeast-2");
        let handles = Handles::new(RegionConnector::default(), &credential);

        assert_eq!(handles.region(), "ap-northeast-2");
        assert_eq!(handles.client(), "client@ap-northeast-2");
        assert_eq!(handles.resource(), "resource@ap-northeast-2");
    }

    #[test]
    fn test_region_change_is_not_retroactive() {
        let mut credential = Credential::new("AKIA", "secret", "ap-northeast-2");
        let handles = Handles::new(RegionConnector::default(), &credential);

        credential.set_region("us-east-1");

        assert_eq!(handles.region(), "ap-northeast-2");
        assert_eq!(handles.client(), "client@ap-northeast-2");
        assert_eq!(handles.resource(), "resource@ap-northeast-2");
    }

    #[test]
    fn test_rebind_rebuilds_both_handles() {
        let mut credential = Credential::new("AKIA", "secret", "ap-northeast-2");
        let mut handles = Handles::new(RegionConnector::default(), &credential);

        credential.set_region("us-east-1");
        handles.rebind(&credential);

        assert_eq!(handles.region(), "us-east-1");
        assert_eq!(handles.client(), "client@us-east-1");
        assert_eq!(handles.resource(), "resource@us-east-1");
        assert_eq!(handles.connector().builds.load(Ordering::SeqCst), 4);
    }
}
