/*
 *
 *  * Copyright (c) 2025 Couchbase, Inc.
 *  *
 *  * Licensed under the Apache License, Version 2.0 (the "License");
 *  * you may not use this file except in compliance with the License.
 *  * You may obtain a copy of the License at
 *  *
 *  *    http://www.apache.org/licenses/LICENSE-2.0
 *  *
 *  * Unless required by applicable law or agreed to in writing, software
 *  * distributed under the License is distributed on an "AS IS" BASIS,
 *  * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  * See the License for the specific language governing permissions and
 *  * limitations under the License.
 *
 */

use crate::credential::Credential;
use crate::deserializer::Deserializer;
use crate::error;
use crate::options::cluster_options::ClusterOptions;
use crate::options::kwargs::ClusterOptionsKwargs;
use crate::protocol::connection::ConnectionDetails;
use crate::protocol::core::client::CoreClient;
use crate::protocol::core::error::{CallOrigin, ErrorMapper};
use crate::protocol::core::request::{CloseConnectionRequest, ClusterInfoRequest, ConnectRequest};
use crate::protocol::options_builder::OptionsBuilder;
use crate::runtime::resolve_runtime;
use arc_swap::ArcSwapOption;
use serde_json::Value;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::OnceCell;
use tracing::debug;
use uuid::Uuid;

type ClientFactory<C> = Box<dyn Fn() -> C + Send + Sync>;

/// Owns the core client and its connection, and runs every core call through the
/// [`ErrorMapper`].
///
/// The core client is created by the first call to [`connect`](ClientAdapter::connect) and is
/// never recreated; concurrent first connects create it exactly once.
pub struct ClientAdapter<C: CoreClient> {
    id: String,
    runtime: Handle,
    options_builder: OptionsBuilder,
    connection_details: ConnectionDetails,
    client_factory: ClientFactory<C>,
    client: OnceCell<Arc<C>>,
    connection: ArcSwapOption<C::Connection>,
}

impl<C: CoreClient + Default> ClientAdapter<C> {
    pub fn new(
        connection_string: impl Into<String>,
        credential: Credential,
        options: impl Into<Option<ClusterOptions>>,
        runtime: impl Into<Option<Handle>>,
    ) -> error::Result<Self> {
        Self::build(
            connection_string.into(),
            credential,
            options.into(),
            None,
            runtime.into(),
        )
    }

    /// Like [`new`](ClientAdapter::new), with the options given as flat keyword options.
    pub fn with_kwargs(
        connection_string: impl Into<String>,
        credential: Credential,
        kwargs: ClusterOptionsKwargs,
        runtime: impl Into<Option<Handle>>,
    ) -> error::Result<Self> {
        Self::build(
            connection_string.into(),
            credential,
            None,
            Some(kwargs),
            runtime.into(),
        )
    }

    fn build(
        connection_string: String,
        credential: Credential,
        options: Option<ClusterOptions>,
        kwargs: Option<ClusterOptionsKwargs>,
        runtime: Option<Handle>,
    ) -> error::Result<Self> {
        let mut id = Uuid::new_v4().to_string();
        id.truncate(6);

        let runtime = resolve_runtime(runtime)?;
        let options_builder = OptionsBuilder::new();
        let connection_details = ConnectionDetails::create(
            &options_builder,
            connection_string,
            credential,
            options,
            kwargs,
        )?;

        debug!(adapter_id = %id, "Created client adapter for {}", connection_details.conn_spec());

        Ok(Self {
            id,
            runtime,
            options_builder,
            connection_details,
            client_factory: Box::new(C::default),
            client: OnceCell::new(),
            connection: ArcSwapOption::empty(),
        })
    }
}

impl<C: CoreClient> ClientAdapter<C> {
    /// Replaces how the core client is created. Has no effect once the client exists.
    pub fn client_factory(mut self, factory: impl Fn() -> C + Send + Sync + 'static) -> Self {
        self.client_factory = Box::new(factory);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The core client, if a connect has been attempted.
    pub fn client(&self) -> Option<Arc<C>> {
        self.client.get().cloned()
    }

    pub fn has_connection(&self) -> bool {
        self.connection.load().is_some()
    }

    pub fn connection_details(&self) -> &ConnectionDetails {
        &self.connection_details
    }

    pub fn default_deserializer(&self) -> Arc<dyn Deserializer> {
        self.connection_details.default_deserializer()
    }

    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }

    pub fn options_builder(&self) -> &OptionsBuilder {
        &self.options_builder
    }

    pub fn connect_request(&self) -> ConnectRequest {
        self.connection_details.connect_request()
    }

    pub async fn connect(&self, req: ConnectRequest) -> error::Result<()> {
        let client = self
            .client
            .get_or_init(|| async {
                debug!(adapter_id = %self.id, "Creating core client");
                Arc::new((self.client_factory)())
            })
            .await
            .clone();

        debug!(adapter_id = %self.id, "Connecting to {}", req.connection_string);
        let connection = client
            .connect(req)
            .await
            .map_err(|e| ErrorMapper::map(e, CallOrigin::Connect))?;

        self.connection.store(Some(Arc::new(connection)));
        debug!(adapter_id = %self.id, "Connected");

        Ok(())
    }

    /// Runs [`connect`](ClientAdapter::connect) to completion on the adapter's runtime.
    /// Fails when called from within a runtime.
    pub fn blocking_connect(&self, req: ConnectRequest) -> error::Result<()> {
        if Handle::try_current().is_ok() {
            return Err(error::Error::runtime(
                "blocking_connect cannot be called from within an async runtime, use connect instead",
            ));
        }

        self.runtime.block_on(self.connect(req))
    }

    /// Closes the connection, if any. The core client is kept for later connects.
    pub async fn close(&self, req: CloseConnectionRequest) -> error::Result<()> {
        let Some(connection) = self.connection.swap(None) else {
            debug!(adapter_id = %self.id, "Close requested without a connection");
            return Ok(());
        };
        let Some(client) = self.client.get() else {
            return Err(error::Error::internal_sdk(
                "a connection exists without a core client",
            ));
        };

        debug!(adapter_id = %self.id, "Closing connection");
        client
            .close(&connection, req)
            .await
            .map_err(|e| ErrorMapper::map(e, CallOrigin::Close))
    }

    pub async fn get_cluster_info(&self) -> error::Result<Value> {
        let connection = self.connection.load_full();
        let (Some(connection), Some(client)) = (connection, self.client.get()) else {
            return Err(error::Error::new(error::ErrorKind::ClientNotConnected));
        };

        client
            .get_cluster_info(&connection, ClusterInfoRequest::new())
            .await
            .map_err(|e| ErrorMapper::map(e, CallOrigin::GetClusterInfo))
    }
}

impl<C: CoreClient> Debug for ClientAdapter<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientAdapter")
            .field("id", &self.id)
            .field("connection_details", &self.connection_details)
            .field("has_client", &self.client.initialized())
            .field("has_connection", &self.has_connection())
            .finish()
    }
}
