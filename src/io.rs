use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tempfile::NamedTempFile;

pub fn assert_not_stdout(path: &Path) -> Result<()> {
    if path == Path::new("-") {
        bail!("stdout is not supported; provide a real file path.");
    }
    Ok(())
}

/// Write-then-rename wrapper for atomic report outputs
pub struct PendingWrite {
    target: PathBuf,
    tmp: Option<(NamedTempFile, bool)>, // (file, need_fsync_dir)
}

impl PendingWrite {
    /// Open a target path for writing via a sibling tempfile.
    pub fn open(target: &Path, force: bool) -> Result<Self> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        if !force && target.exists() {
            bail!("Refusing to overwrite existing file: {} (use --force)", target.display());
        }
        let need_fsync_dir = target.parent().is_some();
        let tmp = NamedTempFile::new_in(target.parent().unwrap_or(Path::new(".")))
            .context("create temp file")?;

        Ok(Self { target: target.to_path_buf(), tmp: Some((tmp, need_fsync_dir)) })
    }

    /// Rename the tempfile over the target.
    pub fn finalize(&mut self) -> Result<()> {
        let (tmp, need_fsync_dir) = self.tmp.take().expect("not finalized");
        tmp.as_file().sync_all().ok(); // best-effort fsync file
        tmp.persist(&self.target)
            .with_context(|| format!("rename to {}", self.target.display()))?;
        if need_fsync_dir {
            if let Some(dir) = self.target.parent() {
                let _ = File::open(dir).and_then(|f| f.sync_all());
            }
        }
        Ok(())
    }
}

impl Write for PendingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.tmp.as_mut().unwrap().0.write(buf)
    }
    fn flush(&mut self) -> std::io::Result<()> {
        self.tmp.as_mut().unwrap().0.flush()
    }
}
