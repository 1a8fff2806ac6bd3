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

use std::path::PathBuf;

/// TLS related options.
///
/// At most one of the `trust_only_*` trust sources can be set, the builder rejects
/// options naming more than one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct SecurityOptions {
    pub trust_only_capella: Option<bool>,
    pub trust_only_pem_file: Option<PathBuf>,
    pub trust_only_pem_str: Option<String>,
    pub trust_only_certificates: Option<Vec<String>>,
    pub trust_only_platform: Option<bool>,
    pub verify_server_certificate: Option<bool>,
    pub cipher_suites: Option<Vec<String>>,
}

impl SecurityOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trusts only the Capella CA certificate.
    pub fn trust_only_capella() -> Self {
        Self::new().set_trust_only_capella(true)
    }

    pub fn trust_only_pem_file(path: impl Into<PathBuf>) -> Self {
        Self::new().set_trust_only_pem_file(path)
    }

    pub fn trust_only_pem_str(pem: impl Into<String>) -> Self {
        Self::new().set_trust_only_pem_str(pem)
    }

    pub fn trust_only_certificates(certificates: Vec<String>) -> Self {
        Self::new().set_trust_only_certificates(certificates)
    }

    /// Trusts only the certificates known to the platform.
    pub fn trust_only_platform() -> Self {
        Self::new().set_trust_only_platform(true)
    }

    pub fn set_trust_only_capella(mut self, trust_only_capella: bool) -> Self {
        self.trust_only_capella = Some(trust_only_capella);
        self
    }

    pub fn set_trust_only_pem_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.trust_only_pem_file = Some(path.into());
        self
    }

    pub fn set_trust_only_pem_str(mut self, pem: impl Into<String>) -> Self {
        self.trust_only_pem_str = Some(pem.into());
        self
    }

    pub fn set_trust_only_certificates(mut self, certificates: Vec<String>) -> Self {
        self.trust_only_certificates = Some(certificates);
        self
    }

    pub fn set_trust_only_platform(mut self, trust_only_platform: bool) -> Self {
        self.trust_only_platform = Some(trust_only_platform);
        self
    }

    pub fn verify_server_certificate(mut self, verify: bool) -> Self {
        self.verify_server_certificate = Some(verify);
        self
    }

    pub fn cipher_suites(mut self, cipher_suites: Vec<String>) -> Self {
        self.cipher_suites = Some(cipher_suites);
        self
    }

    // Names of the trust sources in effect, in declaration order. A flag set to false is not a
    // source.
    pub(crate) fn trust_sources(&self) -> Vec<&'static str> {
        let mut sources = vec![];
        if self.trust_only_capella == Some(true) {
            sources.push("trust_only_capella");
        }
        if self.trust_only_pem_file.is_some() {
            sources.push("trust_only_pem_file");
        }
        if self.trust_only_pem_str.is_some() {
            sources.push("trust_only_pem_str");
        }
        if self.trust_only_certificates.is_some() {
            sources.push("trust_only_certificates");
        }
        if self.trust_only_platform == Some(true) {
            sources.push("trust_only_platform");
        }
        sources
    }
}
