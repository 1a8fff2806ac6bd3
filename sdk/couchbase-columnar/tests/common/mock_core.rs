use async_trait::async_trait;
use couchbase_columnar::protocol::core::{
    CloseConnectionRequest, ClusterInfoRequest, ConnectRequest, CoreClient, CoreError,
    CoreFailure, CoreResult, ErrorMapper,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub enum MockOutcome {
    #[default]
    Succeed,
    // Returned as a core sentinel.
    Core(CoreError),
    // Returned as an already typed SDK error.
    Sdk(CoreError),
    Other(String),
}

impl MockOutcome {
    fn into_result<T>(self, value: T) -> CoreResult<T> {
        match self {
            MockOutcome::Succeed => Ok(value),
            MockOutcome::Core(e) => Err(CoreFailure::Core(e)),
            MockOutcome::Sdk(e) => Err(CoreFailure::Sdk(ErrorMapper::build_error(e))),
            MockOutcome::Other(msg) => Err(CoreFailure::Other(msg.into())),
        }
    }
}

#[derive(Debug)]
pub struct MockConnection {
    pub connection_string: String,
    pub username: String,
}

#[derive(Debug, Default)]
pub struct MockCoreClient {
    pub connect_outcome: MockOutcome,
    pub close_outcome: MockOutcome,
    pub cluster_info_outcome: MockOutcome,
    pub connect_delay: Option<Duration>,
    pub connect_calls: AtomicUsize,
    pub close_calls: AtomicUsize,
    pub last_connect: Mutex<Option<ConnectRequest>>,
}

impl MockCoreClient {
    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CoreClient for MockCoreClient {
    type Connection = MockConnection;

    async fn connect(&self, req: ConnectRequest) -> CoreResult<Self::Connection> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.connect_delay {
            tokio::time::sleep(delay).await;
        }

        let connection = MockConnection {
            connection_string: req.connection_string.clone(),
            username: req.credential.username().to_string(),
        };
        *self.last_connect.lock().unwrap() = Some(req);

        self.connect_outcome.clone().into_result(connection)
    }

    async fn close(
        &self,
        _connection: &Self::Connection,
        _req: CloseConnectionRequest,
    ) -> CoreResult<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        self.close_outcome.clone().into_result(())
    }

    async fn get_cluster_info(
        &self,
        connection: &Self::Connection,
        _req: ClusterInfoRequest,
    ) -> CoreResult<Value> {
        self.cluster_info_outcome.clone().into_result(json!({
            "connection_string": connection.connection_string,
            "username": connection.username,
            "nodes": [{"services": {"cbas": 18095}}],
        }))
    }
}
