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
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

/// A username and password pair used to authenticate against a Columnar cluster.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Credential {
    username: String,
    password: String,
}

impl Credential {
    pub fn from_username_and_password(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Builds a credential from a callback, e.g. one that fetches rotated credentials.
    ///
    /// The returned credential goes through the same validation as an untyped one.
    pub fn from_callable<F>(callback: F) -> error::Result<Self>
    where
        F: FnOnce() -> Credential,
    {
        let value = serde_json::to_value(callback()).map_err(|e| {
            error::Error::invalid_argument("credential", format!("unserializable credential: {e}"))
        })?;

        Self::try_from(&value)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn as_map(&self) -> HashMap<String, String> {
        HashMap::from([
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
        ])
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn required_str(value: &Value, field: &str) -> error::Result<String> {
    match value.get(field) {
        None | Some(Value::Null) => Err(error::Error::invalid_argument(
            field,
            format!("Must provide a {field}."),
        )),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(error::Error::invalid_argument(
            field,
            format!("The {field} must be a str."),
        )),
    }
}

impl TryFrom<&Value> for Credential {
    type Error = error::Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let username = required_str(value, "username")?;
        let password = required_str(value, "password")?;

        Ok(Self { username, password })
    }
}
