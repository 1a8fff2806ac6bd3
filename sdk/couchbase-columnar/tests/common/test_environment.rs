use crate::common::test_config::{setup_tests, TestConfig};
use couchbase_columnar::credential::Credential;
use couchbase_columnar::error;
use couchbase_columnar::options::{ClusterOptions, SecurityOptions};
use couchbase_columnar::protocol::client_adapter::ClientAdapter;
use couchbase_columnar::protocol::core::CoreClient;
use std::sync::Arc;

pub struct TestEnvironment {
    config: Arc<TestConfig>,
}

impl TestEnvironment {
    pub async fn get_environment() -> Self {
        Self {
            config: setup_tests().await,
        }
    }

    pub fn config(&self) -> &TestConfig {
        &self.config
    }

    pub fn fqdn(&self) -> String {
        self.config.fqdn()
    }

    pub fn credential(&self) -> Credential {
        Credential::from_username_and_password(&self.config.username, &self.config.password)
    }

    pub fn security_options(&self) -> Option<SecurityOptions> {
        let mut security_options = match (&self.config.nonprod, &self.config.nonprod_ca_file) {
            (true, Some(ca_file)) => Some(SecurityOptions::trust_only_pem_file(ca_file)),
            _ => None,
        };

        if !self.config.tls_verify {
            security_options = Some(
                security_options
                    .unwrap_or_default()
                    .verify_server_certificate(false),
            );
        }

        security_options
    }

    pub fn cluster_options(&self) -> Option<ClusterOptions> {
        self.security_options()
            .map(|opts| ClusterOptions::new().security_options(opts))
    }

    pub fn create_adapter<C: CoreClient + Default>(&self) -> error::Result<ClientAdapter<C>> {
        self.create_adapter_with(None, None)
    }

    pub fn create_adapter_with<C: CoreClient + Default>(
        &self,
        conn_string: Option<&str>,
        credential: Option<Credential>,
    ) -> error::Result<ClientAdapter<C>> {
        ClientAdapter::new(
            conn_string.unwrap_or(&self.config.conn_string),
            credential.unwrap_or_else(|| self.credential()),
            self.cluster_options(),
            None,
        )
    }
}
