use couchbase_columnar::protocol::client_adapter::ClientAdapter;
use serde_json::json;

use crate::common::mock_core::MockCoreClient;
use crate::common::test_environment::TestEnvironment;

mod common;

#[tokio::test]
async fn test_environment_builds_adapter() {
    let env = TestEnvironment::get_environment().await;

    let adapter: ClientAdapter<MockCoreClient> = env.create_adapter().unwrap();

    let details = adapter.connection_details();
    assert_eq!(details.connection_string(), env.config().conn_string);
    assert_eq!(details.credential().username(), env.config().username);
    assert_eq!(
        details.conn_spec().use_ssl(),
        env.config().use_ssl,
    );

    let security = details
        .cluster_options()
        .to_map()
        .unwrap()
        .get("security_options")
        .cloned();
    if env.config().tls_verify {
        assert!(security
            .as_ref()
            .and_then(|s| s.get("verify_server_certificate"))
            .is_none());
    } else {
        assert_eq!(
            security.and_then(|s| s.get("verify_server_certificate").cloned()),
            Some(json!(false))
        );
    }
}

#[tokio::test]
async fn test_environment_connects_and_reads_cluster_info() {
    let env = TestEnvironment::get_environment().await;
    let adapter: ClientAdapter<MockCoreClient> = env.create_adapter().unwrap();

    adapter.connect(adapter.connect_request()).await.unwrap();
    let info = adapter.get_cluster_info().await.unwrap();

    assert_eq!(info["connection_string"], env.config().conn_string.as_str());
    assert!(!env.fqdn().is_empty());
}

#[tokio::test]
async fn test_environment_with_other_credential() {
    let env = TestEnvironment::get_environment().await;
    let credential = couchbase_columnar::credential::Credential::from_username_and_password(
        "other",
        "secret",
    );

    let adapter: ClientAdapter<MockCoreClient> = env
        .create_adapter_with(Some("couchbase://127.0.0.1"), Some(credential))
        .unwrap();

    assert!(!adapter.connection_details().conn_spec().use_ssl());
    assert_eq!(
        adapter.connection_details().credential().username(),
        "other"
    );
}
