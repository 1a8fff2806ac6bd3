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

use crate::protocol::core::error::CoreResult;
use crate::protocol::core::request::{CloseConnectionRequest, ClusterInfoRequest, ConnectRequest};
use async_trait::async_trait;
use serde_json::Value;

/// The boundary to the client doing the actual network I/O.
///
/// Implementations own connection establishment, query execution and retries. Failures are
/// returned as values and translated by the adapter.
#[async_trait]
pub trait CoreClient: Send + Sync + 'static {
    type Connection: Send + Sync + 'static;

    async fn connect(&self, req: ConnectRequest) -> CoreResult<Self::Connection>;

    async fn close(
        &self,
        connection: &Self::Connection,
        req: CloseConnectionRequest,
    ) -> CoreResult<()>;

    async fn get_cluster_info(
        &self,
        connection: &Self::Connection,
        req: ClusterInfoRequest,
    ) -> CoreResult<Value>;
}
