// src/fetch/probe.rs

//! File-header probe with bounded-sample fallback.
//!
//! Primary strategy: a HEAD request, fingerprinting the file from transport
//! metadata without moving the body. Some servers reject header-only probes,
//! so any HEAD failure switches to the fallback: a streaming GET that reads
//! only the first kilobyte and digests it. Only a failure of the fallback
//! aborts the run.

use reqwest::header::{CONTENT_LENGTH, ETAG, HeaderMap, LAST_MODIFIED};
use url::Url;

use crate::error::Result;
use crate::fingerprint::{Fingerprint, PREFIX_SAMPLE_BYTES, header_signature, prefix_digest};

/// Result of the metadata-only probe. The two branches of the fallback
/// strategy are explicit so each is testable on its own.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// Header metadata was available; signature derived without a transfer.
    Signature(Fingerprint),
    /// The HEAD probe failed for a transport reason; the content-sample
    /// fallback should run.
    NeedsFallback(crate::error::AppError),
}

/// Join the three metadata headers into a signature. Missing or non-ASCII
/// headers contribute empty strings so positions stay stable.
pub fn signature_from_headers(headers: &HeaderMap) -> Fingerprint {
    let field = |name| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    };

    let last_modified = field(LAST_MODIFIED);
    let etag = field(ETAG);
    let content_length = field(CONTENT_LENGTH);

    log::info!("Last-Modified: {last_modified}");
    log::info!("ETag: {etag}");
    log::info!("Content-Length: {content_length}");

    header_signature(last_modified, etag, content_length)
}

/// Attempt the metadata-only probe.
pub async fn probe_metadata(client: &reqwest::Client, url: &Url) -> ProbeOutcome {
    let result = client
        .head(url.clone())
        .send()
        .await
        .and_then(|response| response.error_for_status());

    match result {
        Ok(response) => ProbeOutcome::Signature(signature_from_headers(response.headers())),
        Err(e) => ProbeOutcome::NeedsFallback(e.into()),
    }
}

/// Fallback: stream the body, digest only the first `PREFIX_SAMPLE_BYTES`.
pub async fn sample_prefix(client: &reqwest::Client, url: &Url) -> Result<Fingerprint> {
    let mut response = client
        .get(url.clone())
        .send()
        .await?
        .error_for_status()?;

    let mut sample: Vec<u8> = Vec::with_capacity(PREFIX_SAMPLE_BYTES);
    while sample.len() < PREFIX_SAMPLE_BYTES {
        match response.chunk().await? {
            Some(chunk) => {
                let remaining = PREFIX_SAMPLE_BYTES - sample.len();
                sample.extend_from_slice(&chunk[..chunk.len().min(remaining)]);
            }
            None => break,
        }
    }

    Ok(prefix_digest(&sample))
}

/// Fetch the file signature: HEAD first, then at most one GET-prefix
/// fallback. Exactly one request, plus one more only if the probe fails.
pub async fn fetch_signature(client: &reqwest::Client, url: &Url) -> Result<Fingerprint> {
    log::info!("Checking file headers...");

    match probe_metadata(client, url).await {
        ProbeOutcome::Signature(signature) => Ok(signature),
        ProbeOutcome::NeedsFallback(e) => {
            log::warn!("HEAD request failed: {e}");
            log::info!("Trying with GET request...");
            sample_prefix(client, url).await
        }
    }
}
