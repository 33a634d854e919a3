//! Base64 codec for wiki page content.
//!
//! The service emits unpadded standard base64 on reads, while clients send
//! padded standard base64 on writes. Decoding accepts either form.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD, STANDARD_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::error::CoreError;

/// Standard alphabet, padding optional on decode.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode raw page bytes for a response body (no `=` padding).
pub fn encode_content(bytes: &[u8]) -> String {
    STANDARD_NO_PAD.encode(bytes)
}

/// Encode raw page bytes for a request body (with `=` padding).
pub fn encode_content_padded(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode page content sent by a client or returned by the service.
///
/// Surrounding whitespace is ignored. Padding may be present or absent.
pub fn decode_content(encoded: &str) -> Result<Vec<u8>, CoreError> {
    LENIENT
        .decode(encoded.trim())
        .map_err(|e| CoreError::Validation(format!("content_base64 is not valid base64: {e}")))
}
