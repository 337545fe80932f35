//! Error types for the request augmentation layer.
//!
//! The taxonomy is intentionally small: a malformed CSR is fatal to the
//! finalization attempt that carried it, and every failure of the underlying
//! network call collapses into a single I/O kind so the surrounding protocol
//! engine has one variant to route its retry decisions on.

use thiserror::Error;

/// Result type alias using [`AugmentError`].
pub type Result<T> = std::result::Result<T, AugmentError>;

/// Errors surfaced by the request augmentation layer.
#[derive(Debug, Error)]
pub enum AugmentError {
    /// The CSR bytes do not form a well-formed PKCS#10 structure.
    ///
    /// This is fatal to the enclosing finalization attempt: a malformed CSR
    /// will not become well-formed on retry.
    #[error("CSR parse error: {0}")]
    CsrParse(String),

    /// The underlying network call failed or was interrupted.
    ///
    /// Interrupted waits are re-labeled as I/O failures rather than surfaced
    /// as a distinct interruption signal, so callers handle one kind for all
    /// outbound-call problems.
    #[error("transport I/O error: {0}")]
    TransportIo(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl AugmentError {
    /// Create a CSR parse error with the given message.
    pub fn csr_parse(msg: impl std::fmt::Display) -> Self {
        Self::CsrParse(msg.to_string())
    }

    /// Create a transport I/O error wrapping the underlying cause.
    pub fn transport_io(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::TransportIo(err.into())
    }

    /// Create a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns true if this error came from the network transport.
    ///
    /// Transport failures are the only kind the surrounding protocol engine
    /// may reasonably retry; everything else is fatal to the current attempt.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportIo(_))
    }
}

impl From<der::Error> for AugmentError {
    fn from(err: der::Error) -> Self {
        Self::csr_parse(err)
    }
}

impl From<base64::DecodeError> for AugmentError {
    fn from(err: base64::DecodeError) -> Self {
        Self::csr_parse(err)
    }
}

impl From<reqwest::Error> for AugmentError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport_io(err)
    }
}

impl From<std::io::Error> for AugmentError {
    fn from(err: std::io::Error) -> Self {
        Self::transport_io(err)
    }
}
