//! Feature-file discovery.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::ExtractError;

fn is_feature_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry
            .path()
            .extension()
            .is_some_and(|ext| ext == "feature")
}

/// Recursively list `*.feature` files under `dir`, sorted by path.
///
/// Entries that cannot be visited or whose paths are not UTF-8 are logged
/// and left out.
///
/// # Errors
/// Returns [`ExtractError::DirectoryNotFound`] when `dir` is missing or not
/// a directory.
pub fn discover_feature_files(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, ExtractError> {
    if !dir.is_dir() {
        return Err(ExtractError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let files = WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(is_feature_file)
        .filter_map(|entry| match Utf8PathBuf::from_path_buf(entry.into_path()) {
            Ok(path) => Some(path),
            Err(path) => {
                debug!(path = %path.display(), "skipping non UTF-8 path");
                None
            }
        })
        .collect();
    Ok(files)
}
