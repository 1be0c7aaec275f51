// src/detect.rs

//! Change detection: pure comparison of fingerprints.

use crate::fingerprint::Fingerprint;

/// Sentinel reported when no previous fingerprint exists.
pub const NO_PREVIOUS: &str = "none";

/// Outcome of comparing the current fingerprint against the stored one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the remote resource changed since the last run. A first-ever
    /// run (no stored value) counts as changed.
    pub changed: bool,
    pub previous: Option<Fingerprint>,
    pub current: Fingerprint,
}

impl Verdict {
    /// The previous fingerprint as reported to humans and the outcome sink,
    /// with absence rendered as the `none` sentinel.
    pub fn previous_label(&self) -> &str {
        self.previous
            .as_ref()
            .map(Fingerprint::as_str)
            .unwrap_or(NO_PREVIOUS)
    }
}

/// Compare a newly derived fingerprint against the previously stored one.
///
/// Exact string equality, case-sensitive, no trimming. An absent previous
/// value is always a change.
pub fn compare(previous: Option<Fingerprint>, current: Fingerprint) -> Verdict {
    let changed = previous.as_ref() != Some(&current);
    Verdict {
        changed,
        previous,
        current,
    }
}
