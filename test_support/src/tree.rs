//! Temporary feature trees.

use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary workspace with `features/` and `out/` directories.
///
/// The directory is removed when the value is dropped.
#[derive(Debug)]
pub struct FeatureTree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl FeatureTree {
    /// Create an empty workspace with a `features/` directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the temporary directory cannot be created or
    /// its path is not UTF-8.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create temp dir")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow::anyhow!("non-UTF-8 temp dir {}", path.display()))?;
        fs::create_dir_all(root.join("features")).context("create features dir")?;
        Ok(Self { _dir: dir, root })
    }

    /// Create a workspace pre-populated with a copy of `source`.
    ///
    /// # Errors
    ///
    /// Returns an error when any file cannot be copied.
    pub fn copied_from(source: &Utf8Path) -> Result<Self> {
        let tree = Self::new()?;
        copy_dir(source, &tree.features())?;
        Ok(tree)
    }

    /// Workspace root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Directory holding feature files.
    #[must_use]
    pub fn features(&self) -> Utf8PathBuf {
        self.root.join("features")
    }

    /// Directory generated sources are written under.
    #[must_use]
    pub fn output(&self) -> Utf8PathBuf {
        self.root.join("out")
    }

    /// Write `contents` to `relative` under `features/`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file or its parents cannot be written.
    pub fn write_feature(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.features().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }
}

fn copy_dir(source: &Utf8Path, target: &Utf8Path) -> Result<()> {
    fs::create_dir_all(target).with_context(|| format!("create {target}"))?;
    for entry in source
        .read_dir_utf8()
        .with_context(|| format!("read {source}"))?
    {
        let entry = entry.with_context(|| format!("read entry in {source}"))?;
        let destination = target.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(entry.path(), &destination)?;
        } else {
            fs::copy(entry.path(), &destination)
                .with_context(|| format!("copy {} to {destination}", entry.path()))?;
        }
    }
    Ok(())
}

/// Read every file under `dir`, keyed by `/`-joined relative path.
///
/// # Errors
///
/// Returns an error when any file cannot be read.
pub fn read_tree(dir: &Utf8Path) -> Result<BTreeMap<String, String>> {
    let mut files = BTreeMap::new();
    collect(dir, dir, &mut files)?;
    Ok(files)
}

fn collect(root: &Utf8Path, dir: &Utf8Path, files: &mut BTreeMap<String, String>) -> Result<()> {
    for entry in dir.read_dir_utf8().with_context(|| format!("read {dir}"))? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect(root, path, files)?;
        } else {
            let key = path
                .strip_prefix(root)
                .map_or_else(|_| path.to_string(), |rel| rel.as_str().replace('\\', "/"));
            let text = fs::read_to_string(path).with_context(|| format!("read {path}"))?;
            files.insert(key, text);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn written_features_are_read_back() -> Result<()> {
        let tree = FeatureTree::new()?;
        tree.write_feature("nested/a.feature", "Feature: A\n")?;
        let files = read_tree(&tree.features())?;
        assert_eq!(files.get("nested/a.feature").map(String::as_str), Some("Feature: A\n"));
        Ok(())
    }
}
