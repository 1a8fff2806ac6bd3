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
use lazy_static::lazy_static;
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::debug;

lazy_static! {
    // Built on first use and kept for the lifetime of the process.
    static ref DEFAULT_RUNTIME: Result<Runtime, String> = Builder::new_multi_thread()
        .enable_all()
        .thread_name("cbcolumnar-default")
        .build()
        .map_err(|e| e.to_string());
}

/// A handle to the process wide default runtime, starting it if needed.
pub fn default_runtime() -> error::Result<Handle> {
    match DEFAULT_RUNTIME.as_ref() {
        Ok(runtime) => Ok(runtime.handle().clone()),
        Err(msg) => Err(error::Error::runtime(format!(
            "failed to start the default runtime: {msg}"
        ))),
    }
}

/// Picks the runtime to run on: the given handle, else the runtime we are called from, else
/// the default runtime.
pub fn resolve_runtime(runtime: Option<Handle>) -> error::Result<Handle> {
    if let Some(handle) = runtime {
        return Ok(handle);
    }

    if let Ok(handle) = Handle::try_current() {
        debug!("Using the current runtime");
        return Ok(handle);
    }

    debug!("Using the default runtime");
    default_runtime()
}
