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
use crate::options::security_options::SecurityOptions;
use crate::options::timeout_options::TimeoutOptions;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum IpProtocol {
    Any,
    ForceIpv4,
    ForceIpv6,
}

impl IpProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpProtocol::Any => "any",
            IpProtocol::ForceIpv4 => "force_ipv4",
            IpProtocol::ForceIpv6 => "force_ipv6",
        }
    }
}

impl Display for IpProtocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IpProtocol {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(IpProtocol::Any),
            "force_ipv4" => Ok(IpProtocol::ForceIpv4),
            "force_ipv6" => Ok(IpProtocol::ForceIpv6),
            other => Err(error::Error::invalid_argument(
                "ip_protocol",
                format!("unknown ip protocol {other}, expected any, force_ipv4 or force_ipv6"),
            )),
        }
    }
}

/// Connection level options for a Columnar cluster.
///
/// Every option is unset by default. Unset options are never sent to the core client, which
/// then applies its own defaults.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct ClusterOptions {
    // Allows connection string query options the SDK does not recognize.
    pub allow_unknown_qstr_options: Option<bool>,
    pub config_poll_floor: Option<Duration>,
    pub config_poll_interval: Option<Duration>,
    // The deserializer used for query results when a query does not specify its own.
    pub deserializer: Option<Arc<dyn Deserializer>>,
    pub disable_mozilla_ca_certificates: Option<bool>,
    pub dns_nameserver: Option<String>,
    pub dns_port: Option<u16>,
    pub dump_configuration: Option<bool>,
    pub enable_clustermap_notification: Option<bool>,
    pub ip_protocol: Option<IpProtocol>,
    pub network: Option<String>,
    pub security_options: Option<SecurityOptions>,
    pub timeout_options: Option<TimeoutOptions>,
    pub user_agent_extra: Option<String>,
}

impl ClusterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_unknown_qstr_options(mut self, allow_unknown_qstr_options: bool) -> Self {
        self.allow_unknown_qstr_options = Some(allow_unknown_qstr_options);
        self
    }

    pub fn config_poll_floor(mut self, config_poll_floor: Duration) -> Self {
        self.config_poll_floor = Some(config_poll_floor);
        self
    }

    pub fn config_poll_interval(mut self, config_poll_interval: Duration) -> Self {
        self.config_poll_interval = Some(config_poll_interval);
        self
    }

    pub fn deserializer(mut self, deserializer: Arc<dyn Deserializer>) -> Self {
        self.deserializer = Some(deserializer);
        self
    }

    pub fn disable_mozilla_ca_certificates(mut self, disable: bool) -> Self {
        self.disable_mozilla_ca_certificates = Some(disable);
        self
    }

    pub fn dns_nameserver(mut self, dns_nameserver: impl Into<String>) -> Self {
        self.dns_nameserver = Some(dns_nameserver.into());
        self
    }

    pub fn dns_port(mut self, dns_port: u16) -> Self {
        self.dns_port = Some(dns_port);
        self
    }

    pub fn dump_configuration(mut self, dump_configuration: bool) -> Self {
        self.dump_configuration = Some(dump_configuration);
        self
    }

    pub fn enable_clustermap_notification(mut self, enable: bool) -> Self {
        self.enable_clustermap_notification = Some(enable);
        self
    }

    pub fn ip_protocol(mut self, ip_protocol: IpProtocol) -> Self {
        self.ip_protocol = Some(ip_protocol);
        self
    }

    pub fn network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    pub fn security_options(mut self, security_options: SecurityOptions) -> Self {
        self.security_options = Some(security_options);
        self
    }

    pub fn timeout_options(mut self, timeout_options: TimeoutOptions) -> Self {
        self.timeout_options = Some(timeout_options);
        self
    }

    pub fn user_agent_extra(mut self, user_agent_extra: impl Into<String>) -> Self {
        self.user_agent_extra = Some(user_agent_extra.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::IpProtocol;
    use crate::error::ErrorKind;
    use std::str::FromStr;

    #[test]
    fn ip_protocol_from_str() {
        assert_eq!(IpProtocol::from_str("any").unwrap(), IpProtocol::Any);
        assert_eq!(
            IpProtocol::from_str("force_ipv4").unwrap(),
            IpProtocol::ForceIpv4
        );
        assert_eq!(
            "force_ipv6".parse::<IpProtocol>().unwrap(),
            IpProtocol::ForceIpv6
        );

        let err = IpProtocol::from_str("ipv6").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument(_)));
    }

    #[test]
    fn ip_protocol_serializes_to_its_value() {
        assert_eq!(
            serde_json::to_value(IpProtocol::ForceIpv6).unwrap(),
            serde_json::json!("force_ipv6")
        );
        assert_eq!(IpProtocol::ForceIpv4.to_string(), "force_ipv4");
    }
}
