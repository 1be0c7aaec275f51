// src/fingerprint.rs

//! Fingerprint type and derivation.
//!
//! A fingerprint is an opaque, comparable string standing in for the observed
//! state of a remote resource: an extracted release date, a joined header
//! signature, or a content digest. Comparison is exact string equality.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Compact comparable value representing observed remote state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Fingerprint {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Number of body bytes sampled when header metadata is unavailable.
pub const PREFIX_SAMPLE_BYTES: usize = 1024;

fn date_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "16 Dec 2025" style: 1-2 digits, a word, 4 digits.
    RE.get_or_init(|| Regex::new(r"\d{1,2}\s+\w+\s+\d{4}").expect("date pattern is valid"))
}

/// Extract the release date from the raw measure text.
///
/// The dashboard renders something like `"Content last updated on: 16 Dec
/// 2025"`. The first date-shaped substring becomes the fingerprint; if none is
/// found the whole raw text is used unchanged, so a reformatted dashboard
/// still produces a comparable value.
pub fn extract_release_date(raw: &str) -> Fingerprint {
    match date_pattern().find(raw) {
        Some(m) => Fingerprint::new(m.as_str()),
        None => {
            log::warn!("Could not parse date from {raw:?}, storing full text");
            Fingerprint::new(raw)
        }
    }
}

/// Build the header signature from transport metadata.
///
/// Fields are joined in fixed order with `|`; a missing header contributes an
/// empty string rather than being omitted, keeping positions stable across
/// runs. Known consequence: a response missing its ETag and one carrying an
/// empty ETag produce the same signature.
pub fn header_signature(last_modified: &str, etag: &str, content_length: &str) -> Fingerprint {
    Fingerprint::new(format!("{last_modified}|{etag}|{content_length}"))
}

/// Digest a sampled content prefix. The digest is a change indicator, not a
/// security boundary.
pub fn prefix_digest(bytes: &[u8]) -> Fingerprint {
    Fingerprint::new(format!("{:x}", md5::compute(bytes)))
}
