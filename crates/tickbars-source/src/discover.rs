//! Source file discovery.

use std::path::{Path, PathBuf};

/// Extension of source files (case-sensitive).
const SOURCE_EXTENSION: &str = "csv";

/// Lists the regular `.csv` files directly inside a directory, sorted by path.
///
/// Symlinks are followed; broken links and subdirectories are skipped.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed.
pub async fn discover_csv_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != SOURCE_EXTENSION) {
            continue;
        }
        let is_file = tokio::fs::metadata(&path)
            .await
            .is_ok_and(|metadata| metadata.is_file());
        if is_file {
            files.push(path);
        }
    }

    // Directory order is unspecified
    files.sort();
    Ok(files)
}
