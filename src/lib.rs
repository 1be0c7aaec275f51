// src/lib.rs

//! refwatch: remote-resource change detection between scheduled runs.
//!
//! Two single-pass checkers share this library: `check-release` fingerprints
//! the PCD TRUD release date published on a Power BI dashboard, and
//! `monitor-file` fingerprints a downloadable file from its transport
//! metadata. Each run fetches once, derives a fingerprint, compares it
//! against the persisted one, persists, and exits.

pub mod config;
pub mod detect;
pub mod error;
pub mod fetch;
pub mod fingerprint;
pub mod pipeline;
pub mod report;
pub mod store;
