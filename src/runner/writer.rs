//! File writing helpers for generated classes.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result as AnyResult};
use camino::Utf8Path;
use tracing::info;

use super::ClassSource;

/// Write one class file, creating parent directories as needed.
///
/// # Errors
/// Returns an error when a directory or the file cannot be written.
pub fn write_class_file(path: &Utf8Path, source: &ClassSource) -> AnyResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {parent}"))?;
    }
    let mut file = fs::File::create(path).with_context(|| format!("create {path}"))?;
    file.write_all(source.as_str().as_bytes())
        .with_context(|| format!("write {path}"))?;
    file.flush().with_context(|| format!("flush {path}"))?;
    info!("Wrote step definitions to {path}");
    Ok(())
}

/// Write `text` to stdout.
///
/// # Errors
/// Returns an error when stdout is closed.
pub fn write_stdout(text: &str) -> AnyResult<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .context("write to stdout")
}
