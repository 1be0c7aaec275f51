// src/config.rs

//! Static and environment-driven configuration for the two checkers.
//!
//! All values are plain immutable data handed to the fetch functions, so the
//! fetchers can be pointed at a fake transport in tests.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{AppError, Result};

/// Request timeout applied to every network call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Browser-like user agent; the upstream endpoints reject obvious bots.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Environment variable naming the file URL to monitor.
pub const FILE_URL_VAR: &str = "FILE_URL";

/// Environment variable naming the machine-readable outcome sink.
pub const OUTPUT_SINK_VAR: &str = "GITHUB_OUTPUT";

/// Configuration for the Power BI release checker.
///
/// `Default` carries the production values for the NHS PCD TRUD dashboard;
/// every field can be overridden when driving the fetcher against a stub.
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    /// Power BI public querydata endpoint.
    pub endpoint: String,
    /// Report resource key sent as `x-powerbi-resourcekey`.
    pub resource_key: String,
    /// Origin/Referer the dashboard expects.
    pub origin: String,
    pub referer: String,
    pub user_agent: String,
    /// Dataset the query runs against.
    pub dataset_id: String,
    pub model_id: u64,
    /// Entity and measure selected by the query.
    pub entity: String,
    pub measure: String,
    pub timeout: Duration,
    /// Flat file holding the last observed release fingerprint.
    pub state_path: PathBuf,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            endpoint:
                "https://wabi-uk-south-api.analysis.windows.net/public/reports/querydata?synchronous=true"
                    .to_string(),
            resource_key: "44fb1034-da71-4da9-8015-6464a556bba3".to_string(),
            origin: "https://app.powerbi.com".to_string(),
            referer: "https://app.powerbi.com/".to_string(),
            user_agent: USER_AGENT.to_string(),
            dataset_id: "8adf6a1e-cd48-4975-94e3-2f6f01a702e9".to_string(),
            model_id: 3_881_714,
            entity: "TRUD Release".to_string(),
            measure: "Last_Updated".to_string(),
            timeout: REQUEST_TIMEOUT,
            state_path: PathBuf::from("last_version.txt"),
        }
    }
}

/// Configuration for the file monitor.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// File URL to probe.
    pub target_url: Url,
    /// Optional sink for machine-readable `key=value` outcome lines.
    pub outcome_path: Option<PathBuf>,
    pub user_agent: String,
    pub timeout: Duration,
    /// Flat file holding the last observed signature.
    pub state_path: PathBuf,
}

impl MonitorConfig {
    /// Build the monitor configuration from the environment.
    ///
    /// A missing or unparsable `FILE_URL` is a configuration error, raised
    /// before any network call is attempted.
    pub fn from_env() -> Result<Self> {
        let raw = env::var(FILE_URL_VAR)
            .map_err(|_| AppError::config(format!("{FILE_URL_VAR} environment variable not set")))?;
        let target_url = Url::parse(&raw)
            .map_err(|e| AppError::config(format!("{FILE_URL_VAR} is not a valid URL: {e}")))?;

        Ok(Self {
            target_url,
            outcome_path: env::var_os(OUTPUT_SINK_VAR).map(PathBuf::from),
            user_agent: USER_AGENT.to_string(),
            timeout: REQUEST_TIMEOUT,
            state_path: PathBuf::from("last_hash.txt"),
        })
    }
}
