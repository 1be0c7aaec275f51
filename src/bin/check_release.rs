//! PCD TRUD release checker.
//!
//! Argument-less entry point, intended to run from a scheduler. Exits 0 when
//! the check completed (changed or not), 1 when the release version could
//! not be retrieved.

use std::process::ExitCode;

use refwatch::config::ReleaseConfig;
use refwatch::pipeline::run_release_check;
use refwatch::store::FileStore;

/// Initialize logging to stdout; progress lines are part of the contract.
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format_timestamp_secs()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    let config = ReleaseConfig::default();
    let store = FileStore::new(&config.state_path);

    match run_release_check(&config, &store).await {
        Ok(verdict) => {
            log::info!("SUCCESS: Version stored - {}", verdict.current);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to retrieve version - {e}");
            ExitCode::FAILURE
        }
    }
}
