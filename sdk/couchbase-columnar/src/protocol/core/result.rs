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

use serde::Deserialize;

/// Query metadata as the core client reports it. Times are in nanoseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CoreQueryMetadata {
    pub request_id: String,
    #[serde(default)]
    pub warnings: Vec<CoreQueryWarning>,
    #[serde(default)]
    pub metrics: CoreQueryMetrics,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreQueryMetrics {
    pub elapsed_time: u64,
    pub execution_time: u64,
    pub result_count: u64,
    pub result_size: u64,
    pub processed_objects: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CoreQueryWarning {
    pub code: i32,
    pub message: String,
}
