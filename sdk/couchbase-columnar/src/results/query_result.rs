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
use crate::protocol::core::result::{CoreQueryMetadata, CoreQueryMetrics, CoreQueryWarning};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct QueryWarning {
    pub code: i32,
    pub message: String,
}

impl From<CoreQueryWarning> for QueryWarning {
    fn from(warning: CoreQueryWarning) -> Self {
        Self {
            code: warning.code,
            message: warning.message,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct QueryMetrics {
    pub elapsed_time: Duration,
    pub execution_time: Duration,
    pub result_count: u64,
    pub result_size: u64,
    pub processed_objects: u64,
}

impl From<CoreQueryMetrics> for QueryMetrics {
    fn from(metrics: CoreQueryMetrics) -> Self {
        Self {
            elapsed_time: Duration::from_nanos(metrics.elapsed_time),
            execution_time: Duration::from_nanos(metrics.execution_time),
            result_count: metrics.result_count,
            result_size: metrics.result_size,
            processed_objects: metrics.processed_objects,
        }
    }
}

/// Metadata returned once every row of a query has been read.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct QueryMetadata {
    pub request_id: String,
    pub warnings: Vec<QueryWarning>,
    pub metrics: QueryMetrics,
}

impl From<CoreQueryMetadata> for QueryMetadata {
    fn from(meta: CoreQueryMetadata) -> Self {
        Self {
            request_id: meta.request_id,
            warnings: meta.warnings.into_iter().map(QueryWarning::from).collect(),
            metrics: QueryMetrics::from(meta.metrics),
        }
    }
}

impl TryFrom<&Value> for QueryMetadata {
    type Error = error::Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let meta = CoreQueryMetadata::deserialize(value)
            .map_err(error::Error::decoding_failure_from_serde)?;

        Ok(meta.into())
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryMetadata, QueryWarning};
    use crate::error::ErrorKind;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn metrics_are_nanoseconds() {
        let meta = QueryMetadata::try_from(&json!({
            "request_id": "5b1f7f0c-1b7a-4a53-9a7e-6b1b5d2e3c01",
            "warnings": [{"code": 24400, "message": "plan may be slow"}],
            "metrics": {
                "elapsed_time": 1_500_000_123u64,
                "execution_time": 2_500,
                "result_count": 3,
                "result_size": 128,
                "processed_objects": 7,
            },
        }))
        .unwrap();

        assert_eq!(meta.request_id, "5b1f7f0c-1b7a-4a53-9a7e-6b1b5d2e3c01");
        assert_eq!(meta.metrics.elapsed_time, Duration::new(1, 500_000_123));
        assert_eq!(meta.metrics.execution_time, Duration::from_nanos(2_500));
        assert_eq!(meta.metrics.result_count, 3);
        assert_eq!(meta.metrics.result_size, 128);
        assert_eq!(meta.metrics.processed_objects, 7);
        assert_eq!(
            meta.warnings,
            vec![QueryWarning {
                code: 24400,
                message: "plan may be slow".to_string(),
            }]
        );
    }

    #[test]
    fn empty_warnings_and_missing_metrics() {
        let meta = QueryMetadata::try_from(&json!({
            "request_id": "abc",
            "warnings": [],
        }))
        .unwrap();

        assert!(meta.warnings.is_empty());
        assert_eq!(meta.metrics.elapsed_time, Duration::ZERO);
        assert_eq!(meta.metrics.result_count, 0);
    }

    #[test]
    fn malformed_metadata_is_a_decoding_failure() {
        let err = QueryMetadata::try_from(&json!({"warnings": []})).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::DecodingFailure(_)));

        let err = QueryMetadata::try_from(&json!({
            "request_id": "abc",
            "metrics": {"elapsed_time": -1},
        }))
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::DecodingFailure(_)));
    }
}
