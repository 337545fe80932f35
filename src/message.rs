//! Signed protocol message payloads.
//!
//! The protocol engine builds each signed ACME message as a JSON field map
//! before signing. This layer only ever reads one field from it: the
//! base64url-encoded DER of the CSR in a finalization message.

use base64::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AugmentError, Result};

/// JSON field name carrying the CSR in a finalization message.
const CSR_FIELD: &str = "csr";

/// The claims of one signed protocol message, prior to signing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedPayload(Map<String, Value>);

impl SignedPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a payload from an existing field map.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Set a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    /// Embed a DER-encoded CSR as the base64url `csr` field.
    pub fn set_csr(&mut self, csr_der: &[u8]) {
        self.insert(
            CSR_FIELD,
            Value::String(BASE64_URL_SAFE_NO_PAD.encode(csr_der)),
        );
    }

    /// Decode the `csr` field back into DER bytes, if present.
    ///
    /// # Errors
    ///
    /// A `csr` field that is not a base64url string is treated like any
    /// other malformed CSR and fails with
    /// [`AugmentError::CsrParse`](crate::AugmentError::CsrParse).
    pub fn csr_der(&self) -> Result<Option<Vec<u8>>> {
        match self.0.get(CSR_FIELD) {
            None => Ok(None),
            Some(Value::String(encoded)) => Ok(Some(BASE64_URL_SAFE_NO_PAD.decode(encoded)?)),
            Some(other) => Err(AugmentError::csr_parse(format!(
                "csr field must be a base64url string, got {other}"
            ))),
        }
    }

    /// The underlying field map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}
