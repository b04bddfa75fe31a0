use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use zip::ZipArchive;

/// Create the directory if it doesn't exist; error if a non-directory exists there.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            bail!("Path exists but is not a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
    }
    Ok(())
}

/// Extracts the given `.zip` file to the target directory.
/// If `delete_after` is `true`, removes the `.zip` file after a successful extraction.
pub fn extract_zip(zip_path: &Path, dest_dir: &Path, delete_after: bool) -> Result<()> {
    let file = fs::File::open(zip_path)
        .with_context(|| format!("failed to open {}", zip_path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("failed to read zip archive {}", zip_path.display()))?;

    archive.extract(dest_dir)
        .with_context(|| format!("failed to extract {} to {}", zip_path.display(), dest_dir.display()))?;

    if delete_after {
        fs::remove_file(zip_path)
            .with_context(|| format!("failed to delete {}", zip_path.display()))?;
    }

    Ok(())
}
