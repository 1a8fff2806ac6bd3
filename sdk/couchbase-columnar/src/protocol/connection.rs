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
use crate::deserializer::Deserializer;
use crate::error;
use crate::helpers::durations::parse_golang_duration;
use crate::options::cluster_options::{ClusterOptions, IpProtocol};
use crate::options::kwargs::ClusterOptionsKwargs;
use crate::protocol::core::request::ConnectRequest;
use crate::protocol::options_builder::{CoreClusterOptions, OptionsBuilder};
use couchbase_connstr::ConnSpec;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QueryStringValue {
    Bool,
    Duration,
    IpProtocol,
    Str,
    U16,
}

const QUERY_STRING_OPTIONS: &[(&str, QueryStringValue)] = &[
    ("allow_unknown_qstr_options", QueryStringValue::Bool),
    ("config_poll_floor", QueryStringValue::Duration),
    ("config_poll_interval", QueryStringValue::Duration),
    ("disable_mozilla_ca_certificates", QueryStringValue::Bool),
    ("dns_nameserver", QueryStringValue::Str),
    ("dns_port", QueryStringValue::U16),
    ("dump_configuration", QueryStringValue::Bool),
    ("enable_clustermap_notification", QueryStringValue::Bool),
    ("ip_protocol", QueryStringValue::IpProtocol),
    ("network", QueryStringValue::Str),
    ("user_agent_extra", QueryStringValue::Str),
    ("timeout.connect_timeout", QueryStringValue::Duration),
    ("timeout.dispatch_timeout", QueryStringValue::Duration),
    ("timeout.dns_srv_timeout", QueryStringValue::Duration),
    ("timeout.management_timeout", QueryStringValue::Duration),
    ("timeout.query_timeout", QueryStringValue::Duration),
    ("timeout.resolve_timeout", QueryStringValue::Duration),
    ("timeout.socket_connect_timeout", QueryStringValue::Duration),
    ("security.trust_only_capella", QueryStringValue::Bool),
    ("security.trust_only_pem_file", QueryStringValue::Str),
    ("security.trust_only_pem_str", QueryStringValue::Str),
    ("security.trust_only_platform", QueryStringValue::Bool),
    ("security.verify_server_certificate", QueryStringValue::Bool),
];

fn validate_query_string_value(
    key: &str,
    kind: QueryStringValue,
    value: &str,
) -> error::Result<()> {
    let invalid = |expected: &str| {
        error::Error::invalid_argument(
            key,
            format!("connection string option {key}={value} is not {expected}"),
        )
    };

    match kind {
        QueryStringValue::Bool => {
            bool::from_str(value).map_err(|_| invalid("a boolean"))?;
        }
        QueryStringValue::Duration => {
            parse_golang_duration(value).map_err(|_| invalid("a duration"))?;
        }
        QueryStringValue::IpProtocol => {
            IpProtocol::from_str(value)?;
        }
        QueryStringValue::U16 => {
            u16::from_str(value).map_err(|_| invalid("a port number"))?;
        }
        QueryStringValue::Str => {}
    }

    Ok(())
}

// The connection string is handed to the core verbatim, so its options are only checked here,
// never copied into the cluster options.
fn validate_query_string_options(spec: &ConnSpec, allow_unknown: bool) -> error::Result<()> {
    let allow_unknown = allow_unknown
        || spec
            .option("allow_unknown_qstr_options")
            .is_some_and(|v| v == "true");

    for (key, values) in spec.options() {
        match QUERY_STRING_OPTIONS.iter().find(|(name, _)| *name == key.as_str()) {
            Some((_, kind)) => {
                for value in values {
                    validate_query_string_value(key, *kind, value)?;
                }
            }
            None if allow_unknown => {
                warn!("Passing through unrecognized connection string option {key}");
            }
            None => {
                return Err(error::Error::invalid_argument(
                    key.as_str(),
                    format!("unrecognized connection string option {key}"),
                ));
            }
        }
    }

    Ok(())
}

/// Everything needed to connect, in the shape the core client expects.
#[derive(Clone, Debug)]
pub struct ConnectionDetails {
    connection_string: String,
    credential: Credential,
    cluster_options: CoreClusterOptions,
    default_deserializer: Arc<dyn Deserializer>,
    conn_spec: ConnSpec,
}

impl ConnectionDetails {
    pub fn create(
        options_builder: &OptionsBuilder,
        connection_string: impl Into<String>,
        credential: Credential,
        options: Option<ClusterOptions>,
        kwargs: Option<ClusterOptionsKwargs>,
    ) -> error::Result<Self> {
        let connection_string = connection_string.into();
        let conn_spec = couchbase_connstr::parse(&connection_string)?;

        let built = options_builder.build_cluster_options(options, kwargs)?;
        validate_query_string_options(&conn_spec, built.allow_unknown_qstr_options)?;

        debug!(
            "Created connection details for {} with {} host(s), tls: {}",
            conn_spec,
            conn_spec.hosts().len(),
            conn_spec.use_ssl()
        );

        Ok(Self {
            connection_string,
            credential,
            cluster_options: built.cluster_options,
            default_deserializer: built.default_deserializer,
            conn_spec,
        })
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn cluster_options(&self) -> &CoreClusterOptions {
        &self.cluster_options
    }

    pub fn default_deserializer(&self) -> Arc<dyn Deserializer> {
        self.default_deserializer.clone()
    }

    pub fn conn_spec(&self) -> &ConnSpec {
        &self.conn_spec
    }

    pub fn connect_request(&self) -> ConnectRequest {
        ConnectRequest::new(
            self.connection_string.clone(),
            self.credential.clone(),
            self.cluster_options.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ConnectionDetails;
    use crate::credential::Credential;
    use crate::error::ErrorKind;
    use crate::options::ClusterOptions;
    use crate::protocol::options_builder::OptionsBuilder;

    fn create(
        connstr: &str,
        options: Option<ClusterOptions>,
    ) -> crate::error::Result<ConnectionDetails> {
        ConnectionDetails::create(
            &OptionsBuilder::new(),
            connstr,
            Credential::from_username_and_password("Administrator", "password"),
            options,
            None,
        )
    }

    fn assert_invalid_argument(result: crate::error::Result<ConnectionDetails>, arg: &str) {
        match result {
            Err(e) => match e.kind() {
                ErrorKind::InvalidArgument(kind) => assert_eq!(kind.arg.as_deref(), Some(arg)),
                other => panic!("unexpected error kind {other:?}"),
            },
            Ok(details) => panic!("expected an error, got {details:?}"),
        }
    }

    #[test]
    fn known_query_string_options_are_accepted() {
        let details = create(
            "couchbases://localhost?timeout.connect_timeout=30s&network=external&security.trust_only_capella=true",
            None,
        )
        .unwrap();

        assert!(details.conn_spec().use_ssl());
        assert_eq!(
            details.connection_string(),
            "couchbases://localhost?timeout.connect_timeout=30s&network=external&security.trust_only_capella=true"
        );
        let mut map = details.cluster_options().to_map().unwrap();
        map.remove("user_agent_extra");
        assert!(map.is_empty(), "query string options leaked into {map:?}");
    }

    #[test]
    fn unknown_query_string_option_is_rejected() {
        assert_invalid_argument(
            create("couchbases://localhost?enable_tracing=true", None),
            "enable_tracing",
        );
    }

    #[test]
    fn unknown_query_string_option_is_allowed_when_asked() {
        create(
            "couchbases://localhost?enable_tracing=true",
            Some(ClusterOptions::new().allow_unknown_qstr_options(true)),
        )
        .unwrap();
        create(
            "couchbases://localhost?enable_tracing=true&allow_unknown_qstr_options=true",
            None,
        )
        .unwrap();
    }

    #[test]
    fn malformed_query_string_values_are_rejected() {
        assert_invalid_argument(
            create("couchbases://localhost?timeout.query_timeout=soon", None),
            "timeout.query_timeout",
        );
        assert_invalid_argument(
            create(
                "couchbases://localhost?timeout.query_timeout=94522879700260684295381835.999999h",
                None,
            ),
            "timeout.query_timeout",
        );
        assert_invalid_argument(
            create("couchbases://localhost?dns_port=99999", None),
            "dns_port",
        );
        assert_invalid_argument(
            create("couchbases://localhost?ip_protocol=ipv5", None),
            "ip_protocol",
        );
    }

    #[test]
    fn bad_connection_strings_are_rejected() {
        assert_invalid_argument(create("http://localhost", None), "scheme");
        assert_invalid_argument(create("couchbases://", None), "hosts");
    }

    #[test]
    fn connect_request_carries_details() {
        let details = create("couchbase://10.0.0.1", None).unwrap();
        let req = details.connect_request();

        assert_eq!(req.connection_string, "couchbase://10.0.0.1");
        assert_eq!(req.credential.username(), "Administrator");
        assert_eq!(&req.options, details.cluster_options());
    }
}
