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
use crate::helpers::durations::deserialize_optional_duration;
use crate::options::cluster_options::{ClusterOptions, IpProtocol};
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Cluster, security and timeout options as one flat set of keys.
///
/// This is the shape options take when they come from configuration rather than code, e.g.
/// `{"dns_port": 1053, "connect_timeout": "30s", "trust_only_capella": true}`. Durations are
/// golang formatted duration strings. Unknown keys are rejected.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct ClusterOptionsKwargs {
    pub allow_unknown_qstr_options: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_duration")]
    pub config_poll_floor: Option<Duration>,
    #[serde(default, deserialize_with = "deserialize_optional_duration")]
    pub config_poll_interval: Option<Duration>,
    #[serde(skip)]
    pub deserializer: Option<Arc<dyn Deserializer>>,
    pub disable_mozilla_ca_certificates: Option<bool>,
    pub dns_nameserver: Option<String>,
    pub dns_port: Option<u16>,
    pub dump_configuration: Option<bool>,
    pub enable_clustermap_notification: Option<bool>,
    pub ip_protocol: Option<IpProtocol>,
    pub network: Option<String>,
    pub user_agent_extra: Option<String>,

    pub trust_only_capella: Option<bool>,
    pub trust_only_pem_file: Option<PathBuf>,
    pub trust_only_pem_str: Option<String>,
    pub trust_only_certificates: Option<Vec<String>>,
    pub trust_only_platform: Option<bool>,
    pub verify_server_certificate: Option<bool>,
    pub cipher_suites: Option<Vec<String>>,

    #[serde(default, deserialize_with = "deserialize_optional_duration")]
    pub connect_timeout: Option<Duration>,
    #[serde(default, deserialize_with = "deserialize_optional_duration")]
    pub dispatch_timeout: Option<Duration>,
    #[serde(default, deserialize_with = "deserialize_optional_duration")]
    pub dns_srv_timeout: Option<Duration>,
    #[serde(default, deserialize_with = "deserialize_optional_duration")]
    pub management_timeout: Option<Duration>,
    #[serde(default, deserialize_with = "deserialize_optional_duration")]
    pub query_timeout: Option<Duration>,
    #[serde(default, deserialize_with = "deserialize_optional_duration")]
    pub resolve_timeout: Option<Duration>,
    #[serde(default, deserialize_with = "deserialize_optional_duration")]
    pub socket_connect_timeout: Option<Duration>,
}

macro_rules! override_if_set {
    ($target:expr, $source:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $source.$field {
                $target.$field = Some(value);
            }
        )+
    };
}

impl ClusterOptionsKwargs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(value: &Value) -> error::Result<Self> {
        Self::deserialize(value)
            .map_err(|e| error::Error::invalid_argument("kwargs", e.to_string()))
    }

    // The deserializer cannot come from configuration, it is always set in code.
    pub fn deserializer(mut self, deserializer: Arc<dyn Deserializer>) -> Self {
        self.deserializer = Some(deserializer);
        self
    }

    /// Overlays the keys set here onto `options`, leaving every other option untouched.
    pub fn merge_into(self, mut options: ClusterOptions) -> ClusterOptions {
        override_if_set!(
            options,
            self,
            allow_unknown_qstr_options,
            config_poll_floor,
            config_poll_interval,
            deserializer,
            disable_mozilla_ca_certificates,
            dns_nameserver,
            dns_port,
            dump_configuration,
            enable_clustermap_notification,
            ip_protocol,
            network,
            user_agent_extra,
        );

        let has_security = self.trust_only_capella.is_some()
            || self.trust_only_pem_file.is_some()
            || self.trust_only_pem_str.is_some()
            || self.trust_only_certificates.is_some()
            || self.trust_only_platform.is_some()
            || self.verify_server_certificate.is_some()
            || self.cipher_suites.is_some();
        if has_security {
            let mut security = options.security_options.take().unwrap_or_default();
            override_if_set!(
                security,
                self,
                trust_only_capella,
                trust_only_pem_file,
                trust_only_pem_str,
                trust_only_certificates,
                trust_only_platform,
                verify_server_certificate,
                cipher_suites,
            );
            options.security_options = Some(security);
        }

        let has_timeouts = self.connect_timeout.is_some()
            || self.dispatch_timeout.is_some()
            || self.dns_srv_timeout.is_some()
            || self.management_timeout.is_some()
            || self.query_timeout.is_some()
            || self.resolve_timeout.is_some()
            || self.socket_connect_timeout.is_some();
        if has_timeouts {
            let mut timeouts = options.timeout_options.take().unwrap_or_default();
            override_if_set!(
                timeouts,
                self,
                connect_timeout,
                dispatch_timeout,
                dns_srv_timeout,
                management_timeout,
                query_timeout,
                resolve_timeout,
                socket_connect_timeout,
            );
            options.timeout_options = Some(timeouts);
        }

        options
    }
}

impl From<ClusterOptionsKwargs> for ClusterOptions {
    fn from(kwargs: ClusterOptionsKwargs) -> Self {
        kwargs.merge_into(ClusterOptions::default())
    }
}
