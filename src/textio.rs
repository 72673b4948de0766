//! Legacy text decoding.
//!
//! Resource forks carry text in a single legacy 8-bit encoding, MacRoman
//! unless the caller says otherwise. The selected encoding is an explicit
//! [`EncodingRef`] argument on every call, never process-wide state, so
//! concurrent conversions with different encodings cannot interfere.

use encoding::label::encoding_from_whatwg_label;
use encoding::{DecoderTrap, EncodingRef};

/// The encoding used when the caller does not pick one.
pub fn default_encoding() -> EncodingRef {
    encoding::all::MAC_ROMAN
}

/// Resolve an encoding by WHATWG label, e.g. `"macintosh"` or `"latin1"`.
pub fn encoding_by_name(label: &str) -> Option<EncodingRef> {
    encoding_from_whatwg_label(label)
}

/// Decode legacy bytes to a string, replacing undecodable bytes.
pub fn decode_text(raw: &[u8], encoding: EncodingRef) -> String {
    encoding
        .decode(raw, DecoderTrap::Replace)
        .unwrap_or_else(|_| String::from_utf8_lossy(raw).into_owned())
}

/// Strip a legacy resource name down to filesystem-safe characters.
pub fn sanitize_resource_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}
