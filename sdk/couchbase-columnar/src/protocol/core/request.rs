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
use crate::protocol::options_builder::CoreClusterOptions;

#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ConnectRequest {
    pub connection_string: String,
    pub credential: Credential,
    pub options: CoreClusterOptions,
}

impl ConnectRequest {
    pub fn new(
        connection_string: impl Into<String>,
        credential: Credential,
        options: CoreClusterOptions,
    ) -> Self {
        Self {
            connection_string: connection_string.into(),
            credential,
            options,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct CloseConnectionRequest {}

impl CloseConnectionRequest {
    pub fn new() -> Self {
        Self {}
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ClusterInfoRequest {}

impl ClusterInfoRequest {
    pub fn new() -> Self {
        Self {}
    }
}
