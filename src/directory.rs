// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Approved CA directory and host-based CA resolution.
//!
//! The directory maps each approved CA to its ACME enrollment endpoint and
//! the two certificate-profile identifiers it understands (one for signing
//! certificates, one for authentication certificates). It is loaded by the
//! external configuration subsystem and read-only to this crate.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AugmentError, Result};

/// One approved CA as configured by the operator.
///
/// Immutable once loaded; profile identifiers are optional because not every
/// CA distinguishes certificate templates at enrollment time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaRecord {
    /// Display name of the CA.
    pub name: String,

    /// ACME directory URL of the CA's enrollment endpoint.
    ///
    /// Absent for approved CAs that do not support ACME enrollment.
    #[serde(default)]
    pub acme_server_url: Option<Url>,

    /// Profile identifier for signing (non-repudiation) certificates.
    #[serde(default)]
    pub signing_profile_id: Option<String>,

    /// Profile identifier for authentication certificates.
    #[serde(default)]
    pub auth_profile_id: Option<String>,
}

impl CaRecord {
    /// Host of the enrollment endpoint, as produced by URL parsing.
    pub fn enrollment_host(&self) -> Option<&str> {
        self.acme_server_url.as_ref().and_then(Url::host_str)
    }
}

/// Read-only accessor for the configured CA records.
///
/// Injected into [`RequestAugmenter`](crate::RequestAugmenter) at
/// construction; this crate never mutates the directory.
pub trait CaDirectory: Send + Sync {
    /// All configured CA records, in configuration order.
    fn records(&self) -> &[CaRecord];
}

/// A [`CaDirectory`] backed by a fixed list of records.
///
/// This is the shape the configuration subsystem hands over after loading;
/// see [`StaticCaDirectory::from_toml`] for the on-disk schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticCaDirectory {
    /// Configured CA records.
    #[serde(rename = "ca", default)]
    records: Vec<CaRecord>,
}

impl StaticCaDirectory {
    /// Create a directory from a list of records.
    pub fn new(records: Vec<CaRecord>) -> Self {
        Self { records }
    }

    /// Parse a directory from a TOML document.
    ///
    /// ```toml
    /// [[ca]]
    /// name = "Example CA"
    /// acme_server_url = "https://ca.example.com/acme/directory"
    /// signing_profile_id = "sign-profile"
    /// auth_profile_id = "auth-profile"
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| AugmentError::config(format!("invalid TOML: {e}")))
    }
}

impl CaDirectory for StaticCaDirectory {
    fn records(&self) -> &[CaRecord] {
        &self.records
    }
}

/// Find the configured CA whose enrollment endpoint matches `host`.
///
/// Hosts are compared exactly as produced by URL parsing; records without an
/// enrollment URL are skipped. If several records share a host (a
/// configuration error), the first in configuration order wins. A miss is an
/// expected outcome, not an error: callers proceed without a profile.
pub fn resolve_ca<'a>(host: &str, directory: &'a dyn CaDirectory) -> Option<&'a CaRecord> {
    directory
        .records()
        .iter()
        .find(|record| record.enrollment_host() == Some(host))
}
