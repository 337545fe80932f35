//! Transport seam between the augmentation layer and the network.
//!
//! The protocol engine drives one enrollment operation through the
//! two-method [`Transport`] trait: [`Transport::send_signed`] for the
//! message about to be cryptographically signed, [`Transport::send`] for
//! every HTTP request of the session. [`HttpTransport`] is the terminal
//! implementation; [`RequestAugmenter`](crate::RequestAugmenter) wraps any
//! `Transport` and adds header injection on the way through.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::error::Result;
use crate::message::SignedPayload;

/// `Accept-Charset` value sent on every outbound request.
pub const ACCEPT_CHARSET_UTF8: &str = "utf-8";

/// `Accept-Encoding` value sent when the session accepts compression.
pub const ACCEPT_ENCODING_GZIP: &str = "gzip";

/// Content type of signed ACME message bodies.
pub const CONTENT_TYPE_JOSE_JSON: &str = "application/jose+json";

/// Outbound call path of one enrollment operation.
///
/// Both hooks take `&mut self`: an operation owns its transport stack
/// exclusively, which is what keeps per-operation state out of reach of
/// concurrent operations.
#[async_trait]
pub trait Transport: Send {
    /// Sign `payload` and perform the HTTP exchange carrying it.
    ///
    /// Invoked once per protocol message that is about to be
    /// cryptographically signed.
    async fn send_signed(
        &mut self,
        request: reqwest::RequestBuilder,
        payload: &SignedPayload,
    ) -> Result<reqwest::Response>;

    /// Perform a plain HTTP exchange.
    ///
    /// Invoked for every other HTTP request the protocol engine sends
    /// within the session.
    async fn send(&mut self, request: reqwest::RequestBuilder) -> Result<reqwest::Response>;
}

/// Produces the signed wire body for a payload.
///
/// Account key material and JWS construction live behind this seam and are
/// opaque to the augmentation layer.
pub trait PayloadSigner: Send + Sync {
    /// Sign `payload` into the request body to transmit.
    fn sign(&self, payload: &SignedPayload) -> Result<Vec<u8>>;
}

/// Terminal [`Transport`] that signs and executes requests over reqwest.
pub struct HttpTransport {
    signer: Arc<dyn PayloadSigner>,
}

impl HttpTransport {
    /// Create a transport that signs payloads with `signer`.
    pub fn new(signer: Arc<dyn PayloadSigner>) -> Self {
        Self { signer }
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_signed(
        &mut self,
        request: reqwest::RequestBuilder,
        payload: &SignedPayload,
    ) -> Result<reqwest::Response> {
        let body = self.signer.sign(payload)?;
        let response = request
            .header(CONTENT_TYPE, CONTENT_TYPE_JOSE_JSON)
            .body(body)
            .send()
            .await?;
        Ok(response)
    }

    async fn send(&mut self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;
        Ok(response)
    }
}

/// Build a reqwest client suitable for talking to ACME endpoints.
///
/// Rustls with TLS 1.2 as the floor, and the caller's transport timeout. A
/// request that exceeds the timeout surfaces as
/// [`AugmentError::TransportIo`](crate::AugmentError::TransportIo) like any
/// other outbound-call failure.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .use_rustls_tls()
        .min_tls_version(reqwest::tls::Version::TLS_1_2)
        .build()?;
    Ok(client)
}
