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

pub mod client;
pub mod error;
pub mod request;
pub mod result;

pub use client::CoreClient;
pub use error::{CallOrigin, CoreError, CoreErrorCategory, CoreFailure, CoreResult, ErrorMapper};
pub use request::{CloseConnectionRequest, ClusterInfoRequest, ConnectRequest};
pub use result::{CoreQueryMetadata, CoreQueryMetrics, CoreQueryWarning};
