use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::io::PendingWrite;

/// Download a file from `file_url` to `out_path` via a tempfile rename, so a
/// failed transfer never leaves a truncated file behind.
pub fn download_big_file(file_url: &str, out_path: &Path, force: bool) -> Result<()> {
    let mut sink = PendingWrite::open(out_path, force)?;

    let mut resp = reqwest::blocking::get(file_url)
        .with_context(|| format!("GET {file_url}"))?
        .error_for_status()
        .with_context(|| format!("GET {file_url} returned error status"))?;

    std::io::copy(&mut resp, &mut sink)
        .with_context(|| format!("write {}", out_path.display()))?;

    sink.finalize()?;
    Ok(())
}

/// Name the local file after the URL's final path segment.
pub fn url_file_name(url: &str) -> Result<&str> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty() && !name.contains(':'))
        .ok_or_else(|| anyhow!("cannot derive a file name from URL: {url}"))
}
