//! Verification URLs printed on certificates and encoded in QR codes.
//!
//! - short: `{base}/v/{code}`
//! - full:  `{base}/verify?cert={cert}&code={code}`
//!
//! Codes are cleaned to storage form. The certificate number is
//! percent-encoded with the same reserved set as JavaScript's
//! `encodeURIComponent`. Trailing slashes on the base are dropped.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use rscp_core::clean_code;

const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Both URL forms for one credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationUrls {
    pub short: String,
    pub full: String,
}

impl VerificationUrls {
    pub fn new(base_url: &str, certificate_number: &str, verification_code: &str) -> Self {
        Self {
            short: short_verification_url(base_url, verification_code),
            full: full_verification_url(base_url, certificate_number, verification_code),
        }
    }
}

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// `{base}/v/{cleaned code}`.
pub fn short_verification_url(base_url: &str, verification_code: &str) -> String {
    format!("{}/v/{}", trim_base(base_url), clean_code(verification_code))
}

/// `{base}/verify?cert={encoded cert}&code={cleaned code}`.
pub fn full_verification_url(base_url: &str, certificate_number: &str, verification_code: &str) -> String {
    format!(
        "{}/verify?cert={}&code={}",
        trim_base(base_url),
        utf8_percent_encode(certificate_number, COMPONENT),
        utf8_percent_encode(&clean_code(verification_code), COMPONENT)
    )
}
