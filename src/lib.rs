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

//! # acme-augment
//!
//! Request augmentation for ACME certificate enrollment against approved
//! CAs that select certificate templates through a profile identifier.
//!
//! A generic ACME engine (directory discovery, account, order, challenge,
//! finalization) drives its outbound calls through this crate. On the way
//! out, the crate:
//!
//! - inspects the CSR embedded in a finalization payload and extracts the
//!   requested X.509 key usage,
//! - resolves the approved CA matching the session's destination host from
//!   the configured CA directory,
//! - selects that CA's signing or authentication profile identifier based
//!   on whether non-repudiation was requested,
//! - sets the session headers (`Accept-Charset`, `Accept-Language`,
//!   optionally `Accept-Encoding`) on every outbound request and, once a
//!   profile is known, prepends `profileID=<id>` to the `User-Agent`.
//!
//! The engine's request signing and retry semantics are untouched: the
//! augmenter wraps exactly one outbound call at a time and never initiates
//! network traffic on its own.
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use acme_augment::{
//!     build_http_client, EnrollmentSession, HttpTransport, PayloadSigner, RequestAugmenter,
//!     Result, SignedPayload, StaticCaDirectory, Transport,
//! };
//!
//! struct EngineSigner;
//!
//! impl PayloadSigner for EngineSigner {
//!     fn sign(&self, payload: &SignedPayload) -> Result<Vec<u8>> {
//!         // JWS construction with the account key lives in the engine.
//!         Ok(serde_json::to_vec(payload).expect("payload serializes"))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let directory = Arc::new(StaticCaDirectory::from_toml(
//!     r#"
//!     [[ca]]
//!     name = "Example CA"
//!     acme_server_url = "https://ca.example.com/acme/directory"
//!     signing_profile_id = "qscd-sign"
//!     auth_profile_id = "tls-auth"
//!     "#,
//! )?);
//!
//! let session = EnrollmentSession::builder()
//!     .server_url("https://ca.example.com/acme/directory")?
//!     .build()?;
//!
//! let client = build_http_client(Duration::from_secs(30))?;
//!
//! // One augmenter per certificate-issuance operation.
//! let mut transport = RequestAugmenter::new(
//!     HttpTransport::new(Arc::new(EngineSigner)),
//!     directory,
//!     session,
//! );
//!
//! // Finalization: the CSR in the payload drives profile selection.
//! # let csr_der: Vec<u8> = Vec::new();
//! let mut payload = SignedPayload::new();
//! payload.set_csr(&csr_der);
//! transport
//!     .send_signed(
//!         client.post("https://ca.example.com/acme/order/1/finalize"),
//!         &payload,
//!     )
//!     .await?;
//!
//! // Later polling calls of the same operation carry the profile header too.
//! transport
//!     .send(client.get("https://ca.example.com/acme/order/1"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod augment;
pub mod csr;
pub mod directory;
pub mod error;
pub mod message;
pub mod profile;
pub mod session;
pub mod transport;

// Re-export main types at crate root for convenience
pub use augment::RequestAugmenter;
pub use csr::extract_key_usage;
pub use directory::{resolve_ca, CaDirectory, CaRecord, StaticCaDirectory};
pub use error::{AugmentError, Result};
pub use message::SignedPayload;
pub use profile::select_profile;
pub use session::{EnrollmentSession, EnrollmentSessionBuilder};
pub use transport::{build_http_client, HttpTransport, PayloadSigner, Transport};

// Re-export the key-usage types for callers inspecting CSRs themselves
pub use x509_cert::ext::pkix::{KeyUsage, KeyUsages};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default base client identification for the `User-Agent` header.
pub const USER_AGENT: &str = concat!("acme-augment/", env!("CARGO_PKG_VERSION"));
