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

use crate::error::{Error, ErrorKind, InvalidArgumentErrorKind, QueryErrorKind};
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use tracing::debug;

pub const PRE_6_6_CLUSTER_INFO_MESSAGE: &str =
    "If using Couchbase Server < 6.6, a bucket needs to be opened prior to cluster level operations";

/// A failure reported by the core client as a value rather than a typed SDK error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{category}: {message}")]
#[non_exhaustive]
pub struct CoreError {
    pub category: CoreErrorCategory,
    pub message: String,
    pub context: Option<String>,
}

impl CoreError {
    pub fn new(category: CoreErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoreErrorCategory {
    Generic,
    InvalidArgument,
    InvalidCredential,
    Timeout,
    Query { code: i32, server_message: String },
    FeatureUnavailable,
    ServiceUnavailable,
    Internal,
}

impl Display for CoreErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreErrorCategory::Generic => write!(f, "generic"),
            CoreErrorCategory::InvalidArgument => write!(f, "invalid argument"),
            CoreErrorCategory::InvalidCredential => write!(f, "invalid credential"),
            CoreErrorCategory::Timeout => write!(f, "timeout"),
            CoreErrorCategory::Query { code, .. } => write!(f, "query error {code}"),
            CoreErrorCategory::FeatureUnavailable => write!(f, "feature unavailable"),
            CoreErrorCategory::ServiceUnavailable => write!(f, "service unavailable"),
            CoreErrorCategory::Internal => write!(f, "internal"),
        }
    }
}

/// Everything a core call can fail with.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum CoreFailure {
    #[error("{0}")]
    Core(CoreError),
    #[error("{0}")]
    Sdk(Error),
    #[error("{0}")]
    Other(Box<dyn StdError + Send + Sync>),
}

impl From<CoreError> for CoreFailure {
    fn from(value: CoreError) -> Self {
        CoreFailure::Core(value)
    }
}

impl From<Error> for CoreFailure {
    fn from(value: Error) -> Self {
        CoreFailure::Sdk(value)
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreFailure>;

/// The adapter operation a core call was made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CallOrigin {
    Connect,
    Close,
    GetClusterInfo,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorMapper;

impl ErrorMapper {
    /// Converts a core error into the matching SDK error.
    pub fn build_error(core_error: CoreError) -> Error {
        let msg = match core_error.context {
            Some(context) => format!("{} ({context})", core_error.message),
            None => core_error.message,
        };

        let kind = match core_error.category {
            CoreErrorCategory::Generic => ErrorKind::Generic(msg),
            CoreErrorCategory::InvalidArgument => {
                ErrorKind::InvalidArgument(InvalidArgumentErrorKind { msg, arg: None })
            }
            CoreErrorCategory::InvalidCredential => ErrorKind::InvalidCredential(msg),
            CoreErrorCategory::Timeout => ErrorKind::Timeout(msg),
            CoreErrorCategory::Query {
                code,
                server_message,
            } => ErrorKind::Query(QueryErrorKind {
                code,
                server_message,
                msg,
            }),
            CoreErrorCategory::FeatureUnavailable => ErrorKind::FeatureUnavailable(msg),
            CoreErrorCategory::ServiceUnavailable => ErrorKind::ServiceUnavailable(msg),
            CoreErrorCategory::Internal => ErrorKind::InternalSdk(msg),
        };

        Error::new(kind)
    }

    /// Translates any failure of a core call made from `origin` into an SDK error.
    pub fn map(failure: CoreFailure, origin: CallOrigin) -> Error {
        let err = match failure {
            CoreFailure::Core(core_error) => Self::build_error(core_error),
            CoreFailure::Sdk(err) => err,
            CoreFailure::Other(e) => return Error::internal_sdk(e.to_string()),
        };

        if origin == CallOrigin::GetClusterInfo
            && matches!(err.kind(), ErrorKind::ServiceUnavailable(_))
        {
            debug!("Rewriting service unavailable error from cluster info: {err}");
            return err.with_message(PRE_6_6_CLUSTER_INFO_MESSAGE);
        }

        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_error_by_category() {
        let err =
            ErrorMapper::build_error(CoreError::new(CoreErrorCategory::Timeout, "took too long"));
        assert_eq!(err.kind(), &ErrorKind::Timeout("took too long".to_string()));

        let err = ErrorMapper::build_error(
            CoreError::new(
                CoreErrorCategory::Query {
                    code: 24045,
                    server_message: "Cannot find dataset".to_string(),
                },
                "query failed",
            )
            .with_context("SELECT * FROM missing"),
        );
        match err.kind() {
            ErrorKind::Query(kind) => {
                assert_eq!(kind.code, 24045);
                assert_eq!(kind.server_message, "Cannot find dataset");
                assert_eq!(err.message(), "query failed (SELECT * FROM missing)");
            }
            other => panic!("unexpected error kind {other:?}"),
        }
    }

    #[test]
    fn map_core_sentinel() {
        let err = ErrorMapper::map(
            CoreError::new(CoreErrorCategory::InvalidCredential, "auth failed").into(),
            CallOrigin::Connect,
        );

        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidCredential("auth failed".to_string())
        );
    }

    #[test]
    fn map_passes_sdk_errors_through() {
        let original = Error::new(ErrorKind::ServiceUnavailable("no nodes".to_string()));

        let err = ErrorMapper::map(original.clone().into(), CallOrigin::Connect);

        assert_eq!(err, original);
    }

    #[test]
    fn map_rewrites_service_unavailable_from_cluster_info() {
        let err = ErrorMapper::map(
            Error::new(ErrorKind::ServiceUnavailable("no nodes".to_string())).into(),
            CallOrigin::GetClusterInfo,
        );
        assert_eq!(err.message(), PRE_6_6_CLUSTER_INFO_MESSAGE);

        let err = ErrorMapper::map(
            CoreError::new(CoreErrorCategory::ServiceUnavailable, "no nodes").into(),
            CallOrigin::GetClusterInfo,
        );
        assert_eq!(
            err.kind(),
            &ErrorKind::ServiceUnavailable(PRE_6_6_CLUSTER_INFO_MESSAGE.to_string())
        );
    }

    #[test]
    fn map_leaves_other_kinds_from_cluster_info_alone() {
        let err = ErrorMapper::map(
            Error::new(ErrorKind::Timeout("slow".to_string())).into(),
            CallOrigin::GetClusterInfo,
        );

        assert_eq!(err.kind(), &ErrorKind::Timeout("slow".to_string()));
    }

    #[test]
    fn map_wraps_unknown_failures() {
        let err = ErrorMapper::map(
            CoreFailure::Other("socket exploded".into()),
            CallOrigin::Close,
        );

        assert_eq!(
            err.kind(),
            &ErrorKind::InternalSdk("socket exploded".to_string())
        );
    }
}
