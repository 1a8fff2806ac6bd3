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
use serde::Deserialize;
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

// Durations crossing into the core are always whole microseconds, anything finer is truncated.
pub(crate) fn duration_to_micros(arg: &str, duration: Duration) -> error::Result<u64> {
    u64::try_from(duration.as_micros()).map_err(|_| {
        error::Error::invalid_argument(
            arg,
            format!("duration {duration:?} does not fit in 64 bits of microseconds"),
        )
    })
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3_600 * NANOS_PER_SEC),
        _ => None,
    }
}

// Parses golang formatted duration strings such as "30s", "1m30s" or "2.5ms", the format used by
// connection string options. Negative durations are rejected, a Duration cannot hold them.
pub(crate) fn parse_golang_duration(s: &str) -> Result<Duration, String> {
    let orig = s;
    let invalid = || format!("invalid duration \"{orig}\"");

    if s.starts_with('-') {
        return Err(format!("invalid negative duration \"{orig}\""));
    }
    let s = s.strip_prefix('+').unwrap_or(s);

    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    let mut rest = s;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let number = &rest[..number_len];
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(format!("missing unit in duration \"{orig}\""));
        }
        let unit = &rest[..unit_len];
        rest = &rest[unit_len..];

        let scale = unit_nanos(unit)
            .ok_or_else(|| format!("unknown unit \"{unit}\" in duration \"{orig}\""))?;

        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
            return Err(invalid());
        }

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let mut nanos = whole.checked_mul(scale).ok_or_else(invalid)?;

        if !fraction.is_empty() {
            // Digits past the 18th cannot change the result at nanosecond precision.
            let digits = &fraction[..fraction.len().min(18)];
            let value: u128 = digits.parse().map_err(|_| invalid())?;
            let fraction_nanos = value.checked_mul(scale).ok_or_else(invalid)?
                / 10u128.pow(digits.len() as u32);
            nanos = nanos.checked_add(fraction_nanos).ok_or_else(invalid)?;
        }

        total = total.checked_add(nanos).ok_or_else(invalid)?;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| invalid())?;
    Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
}

pub(crate) fn deserialize_optional_duration<'de, D>(
    deserializer: D,
) -> Result<Option<Duration>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    value
        .map(|s| parse_golang_duration(&s).map_err(serde::de::Error::custom))
        .transpose()
}
