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

use crate::error;
use serde_json::Value;
use std::fmt::Debug;

/// Turns the raw bytes of a result row into a value.
pub trait Deserializer: Debug + Send + Sync {
    fn deserialize(&self, value: &[u8]) -> error::Result<Value>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DefaultJsonDeserializer;

impl Deserializer for DefaultJsonDeserializer {
    fn deserialize(&self, value: &[u8]) -> error::Result<Value> {
        serde_json::from_slice(value).map_err(error::Error::decoding_failure_from_serde)
    }
}

// Hands the row text back untouched, for callers doing their own decoding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassthroughDeserializer;

impl Deserializer for PassthroughDeserializer {
    fn deserialize(&self, value: &[u8]) -> error::Result<Value> {
        Ok(Value::String(String::from_utf8_lossy(value).into_owned()))
    }
}
