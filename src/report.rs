// src/report.rs

//! Machine-readable outcome reporting.
//!
//! The file monitor can hand its verdict to an external orchestrator (a
//! GitHub Actions workflow in production) as newline-delimited `key=value`
//! pairs appended to a designated file. The channel is optional: without a
//! configured path the writer is a no-op.

use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use tokio::io::AsyncWriteExt;

use crate::detect::Verdict;
use crate::error::Result;

/// Appends outcome lines to the configured sink, if any.
pub struct OutcomeWriter {
    path: Option<PathBuf>,
}

impl OutcomeWriter {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Render the four outcome lines for a verdict.
    fn render(verdict: &Verdict, timestamp: &str) -> String {
        format!(
            "hash_changed={}\nnew_hash={}\nold_hash={}\ntimestamp={}\n",
            verdict.changed,
            verdict.current,
            verdict.previous_label(),
            timestamp,
        )
    }

    /// Append the outcome for this run. Appending (not truncating) lets
    /// several steps of one workflow share the sink.
    pub async fn write(&self, verdict: &Verdict) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .await?;
        file.write_all(Self::render(verdict, &timestamp).as_bytes())
            .await?;
        file.flush().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::compare;
    use crate::fingerprint::Fingerprint;
    use tempfile::TempDir;

    #[test]
    fn renders_four_lines_in_order() {
        let verdict = compare(Some(Fingerprint::new("old")), Fingerprint::new("new"));
        let rendered = OutcomeWriter::render(&verdict, "2025-01-01T00:00:00Z");
        assert_eq!(
            rendered,
            "hash_changed=true\nnew_hash=new\nold_hash=old\ntimestamp=2025-01-01T00:00:00Z\n"
        );
    }

    #[test]
    fn absent_previous_renders_none_sentinel() {
        let verdict = compare(None, Fingerprint::new("abc"));
        let rendered = OutcomeWriter::render(&verdict, "t");
        assert!(rendered.contains("old_hash=none\n"));
        assert!(rendered.starts_with("hash_changed=true\n"));
    }

    #[test]
    fn unchanged_renders_false() {
        let verdict = compare(Some(Fingerprint::new("same")), Fingerprint::new("same"));
        let rendered = OutcomeWriter::render(&verdict, "t");
        assert!(rendered.starts_with("hash_changed=false\n"));
    }

    #[tokio::test]
    async fn writes_append_across_runs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("outputs");
        let writer = OutcomeWriter::new(Some(path.clone()));

        let first = compare(None, Fingerprint::new("a"));
        let second = compare(Some(Fingerprint::new("a")), Fingerprint::new("a"));
        writer.write(&first).await.unwrap();
        writer.write(&second).await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("hash_changed=").count(), 2);
        assert!(contents.contains("hash_changed=true\nnew_hash=a\nold_hash=none\n"));
        assert!(contents.contains("hash_changed=false\nnew_hash=a\nold_hash=a\n"));
    }

    #[tokio::test]
    async fn missing_sink_is_a_no_op() {
        let writer = OutcomeWriter::new(None);
        let verdict = compare(None, Fingerprint::new("a"));
        writer.write(&verdict).await.unwrap();
    }
}
