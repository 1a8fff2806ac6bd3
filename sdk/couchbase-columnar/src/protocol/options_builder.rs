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

use crate::deserializer::{DefaultJsonDeserializer, Deserializer};
use crate::error;
use crate::helpers::durations::duration_to_micros;
use crate::options::cluster_options::{ClusterOptions, IpProtocol};
use crate::options::kwargs::ClusterOptionsKwargs;
use crate::options::query_options::{QueryOptions, QueryScanConsistency};
use crate::options::security_options::SecurityOptions;
use crate::options::timeout_options::TimeoutOptions;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

pub const SDK_IDENTIFIER: &str = concat!("couchbase-columnar-rust/", env!("CARGO_PKG_VERSION"));

fn to_map<T: Serialize>(value: &T) -> error::Result<Map<String, Value>> {
    match serde_json::to_value(value).map_err(error::Error::encoding_failure_from_serde)? {
        Value::Object(map) => Ok(map),
        other => Err(error::Error::internal_sdk(format!(
            "options serialized to a non-object value: {other}"
        ))),
    }
}

fn micros(arg: &str, duration: Option<Duration>) -> error::Result<Option<u64>> {
    duration.map(|d| duration_to_micros(arg, d)).transpose()
}

/// Timeouts as the core client expects them, in whole microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct CoreTimeoutOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatch_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_srv_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve_timeout: Option<u64>,
    // The per socket connect timeout, not the bootstrap timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<u64>,
}

impl CoreTimeoutOptions {
    pub fn to_map(&self) -> error::Result<Map<String, Value>> {
        to_map(self)
    }

    fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl TryFrom<&TimeoutOptions> for CoreTimeoutOptions {
    type Error = error::Error;

    fn try_from(opts: &TimeoutOptions) -> Result<Self, Self::Error> {
        Ok(Self {
            bootstrap_timeout: micros("connect_timeout", opts.connect_timeout)?,
            dispatch_timeout: micros("dispatch_timeout", opts.dispatch_timeout)?,
            dns_srv_timeout: micros("dns_srv_timeout", opts.dns_srv_timeout)?,
            management_timeout: micros("management_timeout", opts.management_timeout)?,
            analytics_timeout: micros("query_timeout", opts.query_timeout)?,
            resolve_timeout: micros("resolve_timeout", opts.resolve_timeout)?,
            connect_timeout: micros("socket_connect_timeout", opts.socket_connect_timeout)?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct CoreSecurityOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_only_capella: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_only_pem_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_only_pem_str: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_only_certificates: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_only_platform: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify_server_certificate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cipher_suites: Option<Vec<String>>,
}

impl CoreSecurityOptions {
    pub fn to_map(&self) -> error::Result<Map<String, Value>> {
        to_map(self)
    }

    fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl TryFrom<&SecurityOptions> for CoreSecurityOptions {
    type Error = error::Error;

    fn try_from(opts: &SecurityOptions) -> Result<Self, Self::Error> {
        let sources = opts.trust_sources();
        if sources.len() > 1 {
            return Err(error::Error::invalid_argument(
                "security_options",
                format!(
                    "only one trust source can be set, found {}",
                    sources.join(", ")
                ),
            ));
        }

        let trust_only_pem_file = opts
            .trust_only_pem_file
            .as_ref()
            .map(|path| {
                path.to_str().map(str::to_string).ok_or_else(|| {
                    error::Error::invalid_argument(
                        "trust_only_pem_file",
                        format!("path {} is not valid UTF-8", path.display()),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            trust_only_capella: opts.trust_only_capella,
            trust_only_pem_file,
            trust_only_pem_str: opts.trust_only_pem_str.clone(),
            trust_only_certificates: opts.trust_only_certificates.clone(),
            trust_only_platform: opts.trust_only_platform,
            verify_server_certificate: opts.verify_server_certificate,
            cipher_suites: opts.cipher_suites.clone(),
        })
    }
}

/// Cluster options as the core client expects them: renamed keys, durations in whole
/// microseconds and unset options omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct CoreClusterOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_poll_floor: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_poll_interval: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_mozilla_ca_certificates: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_nameserver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dump_configuration: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_clustermap_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_ip_protocol: Option<IpProtocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_options: Option<CoreSecurityOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_options: Option<CoreTimeoutOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent_extra: Option<String>,
}

impl CoreClusterOptions {
    pub fn to_map(&self) -> error::Result<Map<String, Value>> {
        to_map(self)
    }
}

/// The core query request. `lazy_execute` and the deserializer stay on the SDK side.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[non_exhaustive]
pub struct CoreQueryOptions {
    pub statement: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_consistency: Option<QueryScanConsistency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named_parameters: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positional_parameters: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<HashMap<String, Value>>,
}

impl CoreQueryOptions {
    pub fn to_map(&self) -> error::Result<Map<String, Value>> {
        to_map(self)
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct BuiltClusterOptions {
    pub cluster_options: CoreClusterOptions,
    pub default_deserializer: Arc<dyn Deserializer>,
    pub allow_unknown_qstr_options: bool,
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct BuiltQueryOptions {
    pub query_options: CoreQueryOptions,
    // None means the connection's default deserializer applies.
    pub deserializer: Option<Arc<dyn Deserializer>>,
    pub lazy_execute: bool,
}

#[derive(Clone, Debug, Default)]
pub struct OptionsBuilder {}

impl OptionsBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// Merges `kwargs` over `options` and produces the core cluster options.
    pub fn build_cluster_options(
        &self,
        options: Option<ClusterOptions>,
        kwargs: Option<ClusterOptionsKwargs>,
    ) -> error::Result<BuiltClusterOptions> {
        let options = options.unwrap_or_default();
        let options = match kwargs {
            Some(kwargs) => kwargs.merge_into(options),
            None => options,
        };

        let security_options = options
            .security_options
            .as_ref()
            .map(CoreSecurityOptions::try_from)
            .transpose()?
            .filter(|opts| !opts.is_empty());
        let timeout_options = options
            .timeout_options
            .as_ref()
            .map(CoreTimeoutOptions::try_from)
            .transpose()?
            .filter(|opts| !opts.is_empty());

        let user_agent_extra = match options.user_agent_extra.as_deref() {
            Some(extra) if !extra.is_empty() => format!("{SDK_IDENTIFIER};{extra}"),
            _ => SDK_IDENTIFIER.to_string(),
        };

        let cluster_options = CoreClusterOptions {
            config_poll_floor: micros("config_poll_floor", options.config_poll_floor)?,
            config_poll_interval: micros("config_poll_interval", options.config_poll_interval)?,
            disable_mozilla_ca_certificates: options.disable_mozilla_ca_certificates,
            dns_nameserver: options.dns_nameserver,
            dns_port: options.dns_port,
            dump_configuration: options.dump_configuration,
            enable_clustermap_notification: options.enable_clustermap_notification,
            use_ip_protocol: options.ip_protocol,
            network: options.network,
            security_options,
            timeout_options,
            user_agent_extra: Some(user_agent_extra),
        };
        trace!("Built core cluster options {cluster_options:?}");

        Ok(BuiltClusterOptions {
            cluster_options,
            default_deserializer: options
                .deserializer
                .unwrap_or_else(|| Arc::new(DefaultJsonDeserializer)),
            allow_unknown_qstr_options: options.allow_unknown_qstr_options.unwrap_or(false),
        })
    }

    pub fn build_query_options(
        &self,
        statement: impl Into<String>,
        options: Option<QueryOptions>,
    ) -> error::Result<BuiltQueryOptions> {
        let statement = statement.into();
        if statement.trim().is_empty() {
            return Err(error::Error::invalid_argument(
                "statement",
                "the statement must not be empty",
            ));
        }

        let options = options.unwrap_or_default();

        let named_parameters = options.named_parameters.map(|params| {
            params
                .into_iter()
                .map(|(k, v)| {
                    let key = if k.starts_with('$') { k } else { format!("${k}") };
                    (key, v)
                })
                .collect()
        });

        Ok(BuiltQueryOptions {
            query_options: CoreQueryOptions {
                statement,
                timeout: micros("timeout", options.timeout)?,
                scan_consistency: options.scan_consistency,
                priority: options.priority,
                read_only: options.read_only,
                query_context: options.query_context,
                named_parameters,
                positional_parameters: options.positional_parameters,
                raw: options.raw,
            },
            deserializer: options.deserializer,
            lazy_execute: options.lazy_execute.unwrap_or(false),
        })
    }
}
