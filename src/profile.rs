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

//! Certificate-profile selection.

use x509_cert::ext::pkix::{KeyUsage, KeyUsages};

use crate::directory::CaRecord;

/// Pick the CA profile identifier for the requested key usage.
///
/// A CSR requesting non-repudiation is a signing-certificate request and
/// selects the CA's signing profile; anything else selects the
/// authentication profile. Returns `None` when the selected identifier is
/// not configured for this CA (a configuration gap, not an error); callers
/// proceed without injecting a profile header.
pub fn select_profile<'a>(usage: &KeyUsage, ca: &'a CaRecord) -> Option<&'a str> {
    if usage.0.contains(KeyUsages::NonRepudiation) {
        ca.signing_profile_id.as_deref()
    } else {
        ca.auth_profile_id.as_deref()
    }
}
