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

//! Order finalization with profile header injection.
//!
//! Wires a [`RequestAugmenter`] over [`HttpTransport`] against a TOML CA
//! directory and sends one finalization request. The CSR's key usage
//! decides which of the CA's profile identifiers ends up in the
//! `User-Agent` header.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example finalize -- --csr device.csr.der \
//!     --server https://ca.example.com/acme/directory
//! ```

use std::env;
use std::process::exit;
use std::sync::Arc;
use std::time::Duration;

use acme_augment::{
    build_http_client, EnrollmentSession, HttpTransport, PayloadSigner, RequestAugmenter, Result,
    SignedPayload, StaticCaDirectory, Transport,
};

/// Serializes the payload as-is. A real engine signs it into a JWS with
/// its account key behind this seam.
struct PlaintextSigner;

impl PayloadSigner for PlaintextSigner {
    fn sign(&self, payload: &SignedPayload) -> Result<Vec<u8>> {
        serde_json::to_vec(payload)
            .map_err(|e| acme_augment::AugmentError::config(format!("payload serialization: {e}")))
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let server_url = args
        .iter()
        .position(|a| a == "--server")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
        .unwrap_or("https://ca.example.com/acme/directory");

    let csr_path = args
        .iter()
        .position(|a| a == "--csr")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
        .unwrap_or("device.csr.der");

    println!("ACME Finalization Example");
    println!("=========================");
    println!("Server: {}", server_url);
    println!("CSR: {}", csr_path);
    println!();

    let csr_der = match std::fs::read(csr_path) {
        Ok(der) => der,
        Err(e) => {
            eprintln!("Failed to read CSR {}: {}", csr_path, e);
            exit(1);
        }
    };

    match finalize(server_url, &csr_der).await {
        Ok(status) => {
            println!("Finalization responded: {}", status);
        }
        Err(e) => {
            eprintln!("Finalization failed: {}", e);
            exit(1);
        }
    }
}

async fn finalize(server_url: &str, csr_der: &[u8]) -> Result<reqwest::StatusCode> {
    // One CA whose enrollment endpoint is the contacted server; in a
    // deployment this comes from the operator's approved-CA configuration.
    let directory = Arc::new(StaticCaDirectory::from_toml(&format!(
        r#"
        [[ca]]
        name = "Example CA"
        acme_server_url = "{server_url}"
        signing_profile_id = "qscd-sign"
        auth_profile_id = "tls-auth"
        "#,
    ))?);

    let session = EnrollmentSession::builder().server_url(server_url)?.build()?;

    let client = build_http_client(Duration::from_secs(30))?;

    // One augmenter per certificate-issuance operation.
    let mut transport = RequestAugmenter::new(
        HttpTransport::new(Arc::new(PlaintextSigner)),
        directory,
        session,
    );

    let mut payload = SignedPayload::new();
    payload.set_csr(csr_der);

    let finalize_url = format!("{}/order/1/finalize", server_url.trim_end_matches('/'));
    let response = transport
        .send_signed(client.post(finalize_url), &payload)
        .await?;

    Ok(response.status())
}
