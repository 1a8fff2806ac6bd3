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

//! Connection string parsing for Columnar clusters.
//!
//! A connection string has the shape
//! `couchbases://host1[:port][,host2[:port]...][?key=value&...]`. Parsing only
//! splits and validates it; name resolution and bootstrapping belong to the
//! core client, which receives the connection string verbatim.

pub mod error;

use error::ErrorKind;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use tracing::trace;
use url::form_urlencoded;

pub const SCHEME_COUCHBASE: &str = "couchbase";
pub const SCHEME_COUCHBASES: &str = "couchbases";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnSpec {
    scheme: String,
    hosts: Vec<Address>,
    options: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub host: String,
    pub port: Option<u16>,
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(port) = self.port {
            write!(f, "{}:{}", self.host, port)
        } else {
            write!(f, "{}", self.host)
        }
    }
}

impl ConnSpec {
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn use_ssl(&self) -> bool {
        self.scheme == SCHEME_COUCHBASES
    }

    pub fn hosts(&self) -> &[Address] {
        &self.hosts
    }

    pub fn options(&self) -> &BTreeMap<String, Vec<String>> {
        &self.options
    }

    // When an option is repeated the last value wins.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .get(key)
            .and_then(|values| values.last())
            .map(String::as_str)
    }
}

impl Display for ConnSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let hosts = self
            .hosts
            .iter()
            .map(|host| host.to_string())
            .collect::<Vec<String>>()
            .join(",");

        write!(f, "{}://{}", self.scheme, hosts)?;

        let url_options = self
            .options
            .iter()
            .flat_map(|(k, values)| values.iter().map(move |v| format!("{k}={v}")))
            .collect::<Vec<String>>()
            .join("&");

        if !url_options.is_empty() {
            write!(f, "?{url_options}")?;
        }

        Ok(())
    }
}

pub fn parse(conn_str: impl AsRef<str>) -> error::Result<ConnSpec> {
    let conn_str = conn_str.as_ref();

    let parts_matcher =
        Regex::new(r"^((.*)://)?(([^/?:]*)(:([^/?:@]*))?@)?([^/?]*)(/([^?]*))?(\?(.*))?$")
            .map_err(|e| ErrorKind::Parse(format!("invalid parts matcher: {e}")))?;
    let host_matcher = Regex::new(r"((\[[^]]+]+)|([^;,:]+))(:([0-9]*))?(;,)?")
        .map_err(|e| ErrorKind::Parse(format!("invalid host matcher: {e}")))?;

    let parts = parts_matcher
        .captures(conn_str)
        .ok_or_else(|| ErrorKind::Parse(format!("malformed connection string: {conn_str}")))?;

    let scheme = match parts.get(2).map(|m| m.as_str()) {
        Some(scheme @ (SCHEME_COUCHBASE | SCHEME_COUCHBASES)) => scheme.to_string(),
        Some(other) => {
            return Err(error::Error::invalid_argument(
                "scheme",
                format!("unrecognized scheme {other}, expected couchbase or couchbases"),
            ));
        }
        None => {
            return Err(error::Error::invalid_argument(
                "scheme",
                "the connection string must start with couchbase:// or couchbases://",
            ));
        }
    };

    if parts.get(3).is_some() {
        return Err(error::Error::invalid_argument(
            "credentials",
            "credentials must be supplied through a Credential, not the connection string",
        ));
    }

    if parts.get(9).is_some_and(|path| !path.as_str().is_empty()) {
        return Err(error::Error::invalid_argument(
            "path",
            "the connection string must not contain a path",
        ));
    }

    let mut hosts = vec![];
    if let Some(host_list) = parts.get(7) {
        for host_info in host_matcher.captures_iter(host_list.as_str()) {
            let mut address = Address {
                host: host_info[1].to_string(),
                port: None,
            };

            if let Some(port) = host_info.get(5) {
                address.port = Some(
                    port.as_str()
                        .parse()
                        .map_err(|e| ErrorKind::Parse(format!("failed to parse port: {e}")))?,
                );
            }

            hosts.push(address);
        }
    }

    if hosts.is_empty() {
        return Err(error::Error::invalid_argument(
            "hosts",
            "the connection string must contain at least one host",
        ));
    }

    let options = if let Some(options) = parts.get(11) {
        form_urlencoded::parse(options.as_str().as_bytes())
            .into_owned()
            .fold(
                BTreeMap::new(),
                |mut acc: BTreeMap<String, Vec<String>>, (k, v)| {
                    acc.entry(k).or_default().push(v);
                    acc
                },
            )
    } else {
        BTreeMap::default()
    };

    let spec = ConnSpec {
        scheme,
        hosts,
        options,
    };
    trace!("Parsed connection string {conn_str} into {spec:?}");

    Ok(spec)
}
