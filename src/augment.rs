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

//! Request augmentation for one enrollment operation.
//!
//! [`RequestAugmenter`] wraps the operation's transport and intercepts both
//! hooks of the outbound call path. When a finalization payload carries a
//! CSR, the requested key usage is extracted and remembered for the rest of
//! the operation; every outbound request then gets the session headers, and
//! once a CA and profile resolve, a `profileID=<id>` fragment prepended to
//! the `User-Agent` value.
//!
//! One augmenter serves exactly one certificate-issuance operation. A fresh
//! operation needs a fresh augmenter so resolved key usage cannot leak
//! across unrelated certificate requests.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT_CHARSET, ACCEPT_ENCODING, ACCEPT_LANGUAGE, USER_AGENT};
use x509_cert::ext::pkix::KeyUsage;

use crate::csr::extract_key_usage;
use crate::directory::{resolve_ca, CaDirectory};
use crate::error::Result;
use crate::message::SignedPayload;
use crate::profile::select_profile;
use crate::session::EnrollmentSession;
use crate::transport::{Transport, ACCEPT_CHARSET_UTF8, ACCEPT_ENCODING_GZIP};

/// Intercepts the outbound call path of one enrollment operation.
///
/// Holds the inner transport, the CA directory accessor (injected at
/// construction) and the session, plus the one piece of per-operation
/// state: the key usage resolved from the finalization CSR. The state moves
/// `NoUsageKnown → UsageKnown` exactly once and never back; header
/// injection is a no-op until then.
pub struct RequestAugmenter<T> {
    inner: T,
    directory: Arc<dyn CaDirectory>,
    session: EnrollmentSession,
    usage: Option<KeyUsage>,
}

impl<T: Transport> RequestAugmenter<T> {
    /// Create an augmenter for one enrollment operation.
    pub fn new(inner: T, directory: Arc<dyn CaDirectory>, session: EnrollmentSession) -> Self {
        Self {
            inner,
            directory,
            session,
            usage: None,
        }
    }

    /// The session this operation runs under.
    pub fn session(&self) -> &EnrollmentSession {
        &self.session
    }

    /// Consume the augmenter, returning the inner transport.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Record the key usage requested by a CSR-bearing payload.
    ///
    /// The first successful extraction wins for the operation; an absent
    /// key-usage extension leaves prior state unchanged. A payload without
    /// a `csr` field is ignored.
    fn inspect_payload(&mut self, payload: &SignedPayload) -> Result<()> {
        let Some(csr_der) = payload.csr_der()? else {
            return Ok(());
        };

        if let Some(usage) = extract_key_usage(&csr_der)? {
            if self.usage.is_none() {
                tracing::debug!("key usage {:?} resolved from finalization CSR", usage);
                self.usage = Some(usage);
            }
        }

        Ok(())
    }

    /// Profile identifier for the current state, if one resolves.
    fn resolved_profile(&self) -> Option<&str> {
        let usage = self.usage.as_ref()?;
        let host = self.session.host()?;

        let Some(ca) = resolve_ca(host, self.directory.as_ref()) else {
            tracing::trace!("no approved CA matches host {host}, skipping profile header");
            return None;
        };

        let profile = select_profile(usage, ca);
        if profile.is_none() {
            tracing::trace!("CA {} has no profile for the requested usage", ca.name);
        }
        profile
    }

    /// Full `User-Agent` value for the next request.
    fn user_agent(&self) -> String {
        match self.resolved_profile() {
            Some(id) => format!("profileID={} {}", id, self.session.user_agent()),
            None => self.session.user_agent().to_string(),
        }
    }

    /// Set the session headers and, when known, the profile fragment.
    fn apply_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let mut request = request
            .header(ACCEPT_CHARSET, ACCEPT_CHARSET_UTF8)
            .header(ACCEPT_LANGUAGE, self.session.language())
            .header(USER_AGENT, self.user_agent());

        if self.session.compression() {
            request = request.header(ACCEPT_ENCODING, ACCEPT_ENCODING_GZIP);
        }

        request
    }
}

impl<T> std::fmt::Debug for RequestAugmenter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestAugmenter")
            .field("session", &self.session)
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T: Transport> Transport for RequestAugmenter<T> {
    async fn send_signed(
        &mut self,
        request: reqwest::RequestBuilder,
        payload: &SignedPayload,
    ) -> Result<reqwest::Response> {
        self.inspect_payload(payload)?;
        let request = self.apply_headers(request);
        self.inner.send_signed(request, payload).await
    }

    async fn send(&mut self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let request = self.apply_headers(request);
        self.inner.send(request).await
    }
}
