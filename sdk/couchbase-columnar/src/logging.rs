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
use crate::error::ErrorKind;
use tracing::{Level, Subscriber};

/// Setting this environment variable to a log level installs the console logger on
/// [`init_from_env`].
pub const LOG_LEVEL_ENV: &str = "CBCOLUMNAR_LOG_LEVEL";

pub fn parse_log_level(level: &str) -> error::Result<Level> {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(error::Error::invalid_argument(
            "log_level",
            format!(
                "unknown log level {other}, expected one of trace, debug, info, warning or error"
            ),
        )),
    }
}

pub fn console_subscriber(level: Level) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .finish()
}

/// Installs a caller provided subscriber as the global logger.
///
/// Only one logger can be installed per process, later calls fail.
pub fn configure_logging<S>(subscriber: S) -> error::Result<()>
where
    S: Subscriber + Send + Sync + 'static,
{
    tracing::subscriber::set_global_default(subscriber).map_err(|e| {
        error::Error::new(ErrorKind::Generic(format!(
            "cannot configure logging, another logger has already been initialized: {e}"
        )))
    })
}

/// Installs a console logger as the global subscriber.
///
/// Only one logger can be installed per process, later calls fail.
pub fn create_console_logger(level: &str) -> error::Result<()> {
    let level = parse_log_level(level)?;

    configure_logging(console_subscriber(level))
}

/// Installs the console logger when [`LOG_LEVEL_ENV`] is set, returning whether it did.
pub fn init_from_env() -> error::Result<bool> {
    match std::env::var(LOG_LEVEL_ENV) {
        Ok(level) if !level.trim().is_empty() => {
            create_console_logger(level.trim())?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_log_level;
    use tracing::Level;

    #[test]
    fn parse_levels() {
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("Info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
        assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
        assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
        assert!(parse_log_level("critical").is_err());
    }
}
