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

//! PKCS#10 inspection.
//!
//! A finalization message carries the DER-encoded CSR the order is being
//! completed with. The only thing this layer needs from it is the requested
//! X.509 key-usage bit set, which drives certificate-profile selection.

use const_oid::AssociatedOid;
use der::Decode;
use x509_cert::ext::pkix::KeyUsage;
use x509_cert::request::{CertReq, ExtensionReq};

use crate::error::Result;

/// Extract the requested key-usage bit set from a DER-encoded PKCS#10 CSR.
///
/// Reads the `extensionRequest` attribute (RFC 2985) and decodes the
/// key-usage extension if one is present. A CSR that requests no key usage
/// is valid and yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`AugmentError::CsrParse`](crate::AugmentError::CsrParse) if the
/// bytes are not a well-formed PKCS#10 structure or the requested extensions
/// cannot be decoded. This is fatal to the finalization attempt that carried
/// the CSR.
pub fn extract_key_usage(csr_der: &[u8]) -> Result<Option<KeyUsage>> {
    let cert_req = CertReq::from_der(csr_der)?;

    for attribute in cert_req.info.attributes.iter() {
        if attribute.oid != ExtensionReq::OID {
            continue;
        }

        for value in attribute.values.iter() {
            let extension_req = value.decode_as::<ExtensionReq>()?;

            for extension in &extension_req.0 {
                if extension.extn_id == KeyUsage::OID {
                    let usage = KeyUsage::from_der(extension.extn_value.as_bytes())?;
                    return Ok(Some(usage));
                }
            }
        }
    }

    Ok(None)
}
