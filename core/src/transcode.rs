//! UTF-8 to code point conversion at the engine boundary.
//!
//! The engine works on `&[char]` internally: a `char` is a Unicode scalar
//! value by construction, so surrogate exclusion is a type invariant and
//! re-encoding a token can never fail. Validation errors only exist where
//! raw bytes enter the system (dictionary files, stdin in byte mode).

use crate::error::DecodeError;

/// Validate raw bytes as UTF-8, reporting the offset of the first
/// malformed sequence. Encoded surrogates (U+D800..U+DFFF) are malformed
/// UTF-8 and are rejected here.
pub fn validate(bytes: &[u8]) -> Result<&str, DecodeError> {
    std::str::from_utf8(bytes).map_err(|e| DecodeError {
        offset: e.valid_up_to(),
    })
}

/// Decode validated bytes into a code point sequence.
pub fn decode_bytes(bytes: &[u8]) -> Result<Vec<char>, DecodeError> {
    Ok(decode(validate(bytes)?))
}

/// Project an already-validated string onto its code points.
pub fn decode(input: &str) -> Vec<char> {
    input.chars().collect()
}

/// Re-encode a code point sequence as UTF-8. Total: every `char` is a
/// valid scalar value.
pub fn encode(seq: &[char]) -> String {
    seq.iter().collect()
}
