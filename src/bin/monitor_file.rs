//! Downloadable-file monitor.
//!
//! Argument-less entry point driven by the environment: `FILE_URL` names the
//! target (required), `GITHUB_OUTPUT` optionally names a sink for
//! machine-readable outcome lines. Exits 0 when the check completed, 1 on a
//! missing variable or an unrecoverable fetch failure.

use std::process::ExitCode;

use refwatch::config::MonitorConfig;
use refwatch::pipeline::run_file_monitor;
use refwatch::report::OutcomeWriter;
use refwatch::store::FileStore;

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format_timestamp_secs()
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    // Configuration errors are fatal before any network call.
    let config = match MonitorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let store = FileStore::new(&config.state_path);
    let writer = OutcomeWriter::new(config.outcome_path.clone());

    match run_file_monitor(&config, &store, &writer).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Error checking file: {e}");
            ExitCode::FAILURE
        }
    }
}
