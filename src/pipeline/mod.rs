// src/pipeline/mod.rs

//! Pipeline entry points, one per checker.
//!
//! - `run_release_check`: Power BI measure → date fingerprint
//! - `run_file_monitor`: file URL → header signature (or sampled digest)

pub mod monitor;
pub mod release;

pub use monitor::run_file_monitor;
pub use release::run_release_check;
