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

//! Enrollment session identity.
//!
//! A session describes one protocol conversation with one CA: the
//! destination endpoint and the transport settings every outbound request of
//! that conversation shares. It is owned by the protocol engine and
//! read-only to the augmentation layer.

use url::Url;

use crate::error::{AugmentError, Result};
use crate::USER_AGENT;

/// Identity and transport settings of one ACME conversation.
#[derive(Debug, Clone)]
pub struct EnrollmentSession {
    server_url: Url,
    language: String,
    user_agent: String,
    compression: bool,
}

impl EnrollmentSession {
    /// Create a new session builder.
    pub fn builder() -> EnrollmentSessionBuilder {
        EnrollmentSessionBuilder::new()
    }

    /// The ACME server URL this session talks to.
    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    /// Destination host, as produced by URL parsing.
    pub fn host(&self) -> Option<&str> {
        self.server_url.host_str()
    }

    /// Language tag sent in the `Accept-Language` header.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Base client identification sent in the `User-Agent` header.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Whether response compression is accepted.
    pub fn compression(&self) -> bool {
        self.compression
    }
}

/// Builder for [`EnrollmentSession`].
#[derive(Debug, Default)]
pub struct EnrollmentSessionBuilder {
    server_url: Option<Url>,
    language: Option<String>,
    user_agent: Option<String>,
    compression: Option<bool>,
}

impl EnrollmentSessionBuilder {
    /// Create a new session builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ACME server URL.
    pub fn server_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.server_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Set the ACME server URL from a pre-parsed URL.
    pub fn server_url_parsed(mut self, url: Url) -> Self {
        self.server_url = Some(url);
        self
    }

    /// Set the language tag for the `Accept-Language` header.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Override the base `User-Agent` value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Disable response compression (enabled by default).
    pub fn disable_compression(mut self) -> Self {
        self.compression = Some(false);
        self
    }

    /// Build the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the server URL is not set.
    pub fn build(self) -> Result<EnrollmentSession> {
        let server_url = self
            .server_url
            .ok_or_else(|| AugmentError::config("server_url is required"))?;

        Ok(EnrollmentSession {
            server_url,
            language: self.language.unwrap_or_else(|| "en".to_string()),
            user_agent: self.user_agent.unwrap_or_else(|| USER_AGENT.to_string()),
            compression: self.compression.unwrap_or(true),
        })
    }
}
