// src/pipeline/monitor.rs

//! File monitor pipeline: probe → derive → compare → report → persist.

use crate::config::MonitorConfig;
use crate::detect::{Verdict, compare};
use crate::error::Result;
use crate::fetch::{create_client, fetch_signature};
use crate::fingerprint::Fingerprint;
use crate::report::OutcomeWriter;
use crate::store::StateStore;

/// Run one file-monitor check.
pub async fn run_file_monitor(
    config: &MonitorConfig,
    store: &dyn StateStore,
    writer: &OutcomeWriter,
) -> Result<Verdict> {
    log::info!("Monitoring file: {}", config.target_url);

    let client = create_client(&config.user_agent, config.timeout)?;
    let current = fetch_signature(&client, &config.target_url).await?;
    log::info!("Current file signature: {current}");

    conclude(current, store, writer).await
}

/// Compare, report, and persist a freshly derived signature.
///
/// Unlike the release check, the signature is persisted only when it changed;
/// an unchanged run leaves the state file byte-identical.
async fn conclude(
    current: Fingerprint,
    store: &dyn StateStore,
    writer: &OutcomeWriter,
) -> Result<Verdict> {
    let previous = store.load().await?;
    let verdict = compare(previous, current);
    log::info!("Previous signature: {}", verdict.previous_label());

    writer.write(&verdict).await?;

    if verdict.changed {
        store.store(&verdict.current).await?;
        log::info!("File signature changed! Notification will be sent.");
    } else {
        log::info!("No changes detected.");
    }

    Ok(verdict)
}
