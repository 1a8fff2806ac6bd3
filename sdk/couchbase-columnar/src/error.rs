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

use std::error::Error as StdError;
use std::fmt::{Display, Formatter};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Error {
    kind: Box<ErrorKind>,
}

impl Error {
    #[cfg(feature = "unstable-error-construction")]
    pub fn new(kind: ErrorKind) -> Self {
        Self::new_internal(kind)
    }

    #[cfg(not(feature = "unstable-error-construction"))]
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self::new_internal(kind)
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The message carried by the error, without the kind prefix that `Display` adds.
    pub fn message(&self) -> &str {
        match self.kind.as_ref() {
            ErrorKind::Generic(msg)
            | ErrorKind::InvalidCredential(msg)
            | ErrorKind::Timeout(msg)
            | ErrorKind::FeatureUnavailable(msg)
            | ErrorKind::ServiceUnavailable(msg)
            | ErrorKind::InternalSdk(msg)
            | ErrorKind::EncodingFailure(msg)
            | ErrorKind::DecodingFailure(msg)
            | ErrorKind::Runtime(msg) => msg,
            ErrorKind::InvalidArgument(kind) => &kind.msg,
            ErrorKind::Query(kind) => &kind.msg,
            ErrorKind::ClientNotConnected => "the client is not connected",
        }
    }

    pub(crate) fn invalid_argument(arg: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(InvalidArgumentErrorKind {
            msg: msg.into(),
            arg: Some(arg.into()),
        }))
    }

    pub(crate) fn internal_sdk(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalSdk(msg.into()))
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Runtime(msg.into()))
    }

    pub(crate) fn encoding_failure_from_serde(e: serde_json::Error) -> Self {
        Self::new(ErrorKind::EncodingFailure(format!("encoding failed: {e}")))
    }

    pub(crate) fn decoding_failure_from_serde(e: serde_json::Error) -> Self {
        Self::new(ErrorKind::DecodingFailure(format!("decoding failed: {e}")))
    }

    // Only kinds with a free-form message can be rewritten, the rest are returned untouched.
    pub(crate) fn with_message(mut self, msg: impl Into<String>) -> Self {
        let msg = msg.into();
        match self.kind.as_mut() {
            ErrorKind::Generic(m)
            | ErrorKind::InvalidCredential(m)
            | ErrorKind::Timeout(m)
            | ErrorKind::FeatureUnavailable(m)
            | ErrorKind::ServiceUnavailable(m)
            | ErrorKind::InternalSdk(m)
            | ErrorKind::EncodingFailure(m)
            | ErrorKind::DecodingFailure(m)
            | ErrorKind::Runtime(m) => *m = msg,
            ErrorKind::InvalidArgument(kind) => kind.msg = msg,
            ErrorKind::Query(kind) => kind.msg = msg,
            ErrorKind::ClientNotConnected => {}
        }
        self
    }

    fn new_internal(kind: ErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl StdError for Error {}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    Generic(String),
    InvalidArgument(InvalidArgumentErrorKind),
    InvalidCredential(String),
    Timeout(String),
    Query(QueryErrorKind),
    FeatureUnavailable(String),
    ServiceUnavailable(String),
    InternalSdk(String),
    EncodingFailure(String),
    DecodingFailure(String),
    Runtime(String),
    ClientNotConnected,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Generic(msg) => write!(f, "{msg}"),
            ErrorKind::InvalidArgument(invalid_arg_kind) => {
                let arg = &invalid_arg_kind.arg;
                let msg = &invalid_arg_kind.msg;

                if let Some(arg) = arg {
                    write!(f, "invalid argument for {arg}: {msg}")
                } else {
                    write!(f, "invalid argument: {msg}")
                }
            }
            ErrorKind::InvalidCredential(msg) => write!(f, "invalid credential: {msg}"),
            ErrorKind::Timeout(msg) => write!(f, "timeout: {msg}"),
            ErrorKind::Query(query_kind) => write!(
                f,
                "query error (code {}): {} (server message: {})",
                query_kind.code, query_kind.msg, query_kind.server_message
            ),
            ErrorKind::FeatureUnavailable(msg) => write!(f, "feature unavailable: {msg}"),
            ErrorKind::ServiceUnavailable(msg) => write!(f, "service unavailable: {msg}"),
            ErrorKind::InternalSdk(msg) => write!(f, "internal sdk error: {msg}"),
            ErrorKind::EncodingFailure(msg) => write!(f, "encoding failure: {msg}"),
            ErrorKind::DecodingFailure(msg) => write!(f, "decoding failure: {msg}"),
            ErrorKind::Runtime(msg) => write!(f, "runtime error: {msg}"),
            ErrorKind::ClientNotConnected => write!(f, "the client is not connected"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct InvalidArgumentErrorKind {
    pub(crate) msg: String,
    pub arg: Option<String>,
}

impl InvalidArgumentErrorKind {
    #[cfg(feature = "unstable-error-construction")]
    pub fn new(arg: impl Into<Option<String>>, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            arg: arg.into(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct QueryErrorKind {
    pub code: i32,
    pub server_message: String,
    pub(crate) msg: String,
}

impl QueryErrorKind {
    #[cfg(feature = "unstable-error-construction")]
    pub fn new(code: i32, server_message: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            code,
            server_message: server_message.into(),
            msg: msg.into(),
        }
    }
}

impl From<couchbase_connstr::error::Error> for Error {
    fn from(value: couchbase_connstr::error::Error) -> Self {
        let kind = match value.kind() {
            couchbase_connstr::error::ErrorKind::InvalidArgument { msg, arg } => {
                ErrorKind::InvalidArgument(InvalidArgumentErrorKind {
                    msg: msg.clone(),
                    arg: Some(arg.clone()),
                })
            }
            _ => ErrorKind::InvalidArgument(InvalidArgumentErrorKind {
                msg: value.to_string(),
                arg: Some("connstr".to_string()),
            }),
        };

        Error::new_internal(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_display() {
        let err = Error::invalid_argument("username", "Must provide a username.");

        assert_eq!(
            err.to_string(),
            "invalid argument for username: Must provide a username."
        );
        assert_eq!(err.message(), "Must provide a username.");
    }

    #[test]
    fn with_message_rewrites_service_unavailable() {
        let err = Error::new(ErrorKind::ServiceUnavailable("no analytics nodes".to_string()))
            .with_message("rewritten");

        assert_eq!(
            err.kind(),
            &ErrorKind::ServiceUnavailable("rewritten".to_string())
        );
    }

    #[test]
    fn connstr_errors_become_invalid_arguments() {
        let err: Error = couchbase_connstr::parse("http://localhost")
            .expect_err("http scheme is not supported")
            .into();

        match err.kind() {
            ErrorKind::InvalidArgument(kind) => {
                assert_eq!(kind.arg.as_deref(), Some("scheme"))
            }
            other => panic!("unexpected error kind {other:?}"),
        }
    }

    #[test]
    fn connstr_parse_errors_name_the_connection_string() {
        let err: Error = couchbase_connstr::parse("couchbases://localhost:99999")
            .expect_err("port out of range")
            .into();

        match err.kind() {
            ErrorKind::InvalidArgument(kind) => {
                assert_eq!(kind.arg.as_deref(), Some("connstr"))
            }
            other => panic!("unexpected error kind {other:?}"),
        }
    }
}
