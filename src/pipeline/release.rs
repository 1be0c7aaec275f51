// src/pipeline/release.rs

//! Release check pipeline: fetch → derive → compare → persist.

use crate::config::ReleaseConfig;
use crate::detect::{Verdict, compare};
use crate::error::Result;
use crate::fetch::{create_client, fetch_release_text};
use crate::fingerprint::extract_release_date;
use crate::store::StateStore;

/// Run one release check.
///
/// The new fingerprint is always persisted on a successful fetch, changed or
/// not.
pub async fn run_release_check(
    config: &ReleaseConfig,
    store: &dyn StateStore,
) -> Result<Verdict> {
    let client = create_client(&config.user_agent, config.timeout)?;

    let raw = fetch_release_text(&client, config).await?;
    let current = extract_release_date(&raw);
    log::info!("Release date: {current}");

    let previous = store.load().await?;
    let verdict = compare(previous, current);
    log::info!(
        "Previous version: {} -> {}",
        verdict.previous_label(),
        if verdict.changed { "changed" } else { "unchanged" }
    );

    store.store(&verdict.current).await?;
    log::info!("Version stored - {}", verdict.current);

    Ok(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::Fingerprint;
    use crate::store::MemoryStore;

    // The fetch itself needs a live endpoint; the persist-always contract is
    // what the pipeline owns, so exercise it through the store seam.
    #[tokio::test]
    async fn persists_even_when_unchanged() {
        let store = MemoryStore::with_value(Fingerprint::new("16 Dec 2025"));
        let current = extract_release_date("Content last updated on: 16 Dec 2025");

        let previous = store.load().await.unwrap();
        let verdict = compare(previous, current);
        assert!(!verdict.changed);

        store.store(&verdict.current).await.unwrap();
        assert_eq!(
            store.load().await.unwrap(),
            Some(Fingerprint::new("16 Dec 2025"))
        );
    }
}
