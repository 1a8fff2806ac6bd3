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

use std::time::Duration;

/// Client side timeouts. Each unset timeout falls back to the core client's default.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct TimeoutOptions {
    // The time allowed to bootstrap the connection to the cluster.
    pub connect_timeout: Option<Duration>,
    pub dispatch_timeout: Option<Duration>,
    pub dns_srv_timeout: Option<Duration>,
    pub management_timeout: Option<Duration>,
    pub query_timeout: Option<Duration>,
    pub resolve_timeout: Option<Duration>,
    // The time allowed to establish a single socket.
    pub socket_connect_timeout: Option<Duration>,
}

impl TimeoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = Some(connect_timeout);
        self
    }

    pub fn dispatch_timeout(mut self, dispatch_timeout: Duration) -> Self {
        self.dispatch_timeout = Some(dispatch_timeout);
        self
    }

    pub fn dns_srv_timeout(mut self, dns_srv_timeout: Duration) -> Self {
        self.dns_srv_timeout = Some(dns_srv_timeout);
        self
    }

    pub fn management_timeout(mut self, management_timeout: Duration) -> Self {
        self.management_timeout = Some(management_timeout);
        self
    }

    pub fn query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = Some(query_timeout);
        self
    }

    pub fn resolve_timeout(mut self, resolve_timeout: Duration) -> Self {
        self.resolve_timeout = Some(resolve_timeout);
        self
    }

    pub fn socket_connect_timeout(mut self, socket_connect_timeout: Duration) -> Self {
        self.socket_connect_timeout = Some(socket_connect_timeout);
        self
    }
}
