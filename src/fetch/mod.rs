// src/fetch/mod.rs

//! Remote state fetchers.

pub mod powerbi;
pub mod probe;

use std::time::Duration;

use crate::error::Result;

pub use powerbi::fetch_release_text;
pub use probe::{ProbeOutcome, fetch_signature};

/// Create a configured HTTP client.
pub fn create_client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()?;
    Ok(client)
}
