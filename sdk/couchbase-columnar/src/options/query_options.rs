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

use crate::deserializer::Deserializer;
use crate::error;
use crate::error::Error;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum QueryScanConsistency {
    NotBounded,
    RequestPlus,
}

#[derive(Default, Debug, Clone)]
#[non_exhaustive]
pub struct QueryOptions {
    pub(crate) deserializer: Option<Arc<dyn Deserializer>>,
    pub(crate) lazy_execute: Option<bool>,
    pub(crate) named_parameters: Option<HashMap<String, Value>>,
    pub(crate) positional_parameters: Option<Vec<Value>>,
    pub(crate) priority: Option<bool>,
    pub(crate) query_context: Option<String>,
    pub(crate) raw: Option<HashMap<String, Value>>,
    pub(crate) read_only: Option<bool>,
    pub(crate) scan_consistency: Option<QueryScanConsistency>,
    pub(crate) timeout: Option<Duration>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the connection's default deserializer for the rows of this query.
    pub fn deserializer(mut self, deserializer: Arc<dyn Deserializer>) -> Self {
        self.deserializer = Some(deserializer);
        self
    }

    // Defers execution until the first row is requested.
    pub fn lazy_execute(mut self, lazy_execute: bool) -> Self {
        self.lazy_execute = Some(lazy_execute);
        self
    }

    pub fn add_named_parameter<T: Serialize>(
        mut self,
        key: impl Into<String>,
        value: T,
    ) -> error::Result<Self> {
        let value = serde_json::to_value(&value).map_err(Error::encoding_failure_from_serde)?;

        self.named_parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        Ok(self)
    }

    pub fn add_positional_parameter<T: Serialize>(mut self, parameter: T) -> error::Result<Self> {
        let parameter =
            serde_json::to_value(&parameter).map_err(Error::encoding_failure_from_serde)?;

        self.positional_parameters
            .get_or_insert_with(Vec::new)
            .push(parameter);
        Ok(self)
    }

    pub fn priority(mut self, priority: bool) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn query_context(mut self, query_context: impl Into<String>) -> Self {
        self.query_context = Some(query_context.into());
        self
    }

    pub fn add_raw<T: Serialize>(
        mut self,
        key: impl Into<String>,
        value: T,
    ) -> error::Result<Self> {
        let value = serde_json::to_value(&value).map_err(Error::encoding_failure_from_serde)?;

        self.raw
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        Ok(self)
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = Some(read_only);
        self
    }

    pub fn scan_consistency(mut self, scan_consistency: QueryScanConsistency) -> Self {
        self.scan_consistency = Some(scan_consistency);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
