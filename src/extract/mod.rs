//! Step extraction from feature files.
//!
//! [`extract_source`] is a pure scanner over one file's text.
//! [`extract_directory`] discovers files, reads each in sorted order, and
//! collects their steps keyed by the file's path relative to the root.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

mod discover;
mod scanner;

pub use discover::discover_feature_files;
pub use scanner::extract_source;

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use miette::Diagnostic;
use thiserror::Error;
use tracing::{info, warn};

use crate::diagnostics::Issue;
use crate::model::Step;

/// Steps keyed by feature file, in discovery order.
pub type StepsByFile = IndexMap<String, Vec<Step>>;

/// Fatal extraction errors.
#[derive(Debug, Error, Diagnostic)]
pub enum ExtractError {
    /// The feature root is missing or not a directory.
    #[error("feature directory not found: {path}")]
    #[diagnostic(
        code(stepsmith::extract::directory_not_found),
        help("pass the directory that contains your .feature files")
    )]
    DirectoryNotFound {
        /// Path that was given.
        path: Utf8PathBuf,
    },
}

/// Result of extracting a directory.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Steps per file; files are keyed relative to the root with `/`.
    pub steps_by_file: StepsByFile,
    /// Files that could not be read.
    pub issues: Vec<Issue>,
}

impl Extraction {
    /// Total number of steps across files.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps_by_file.values().map(Vec::len).sum()
    }
}

/// Relative, `/`-separated key for a discovered file.
fn file_key(root: &Utf8Path, path: &Utf8Path) -> String {
    path.strip_prefix(root).map_or_else(
        |_| path.as_str().to_owned(),
        |relative| itertools::join(relative.components().map(|c| c.as_str()), "/"),
    )
}

/// Extract steps from every feature file under `dir`.
///
/// Unreadable files are skipped and recorded as [`Issue::FileSkipped`].
///
/// # Errors
/// Returns [`ExtractError::DirectoryNotFound`] when `dir` is missing.
pub fn extract_directory(dir: &Utf8Path) -> Result<Extraction, ExtractError> {
    let mut extraction = Extraction::default();
    for path in discover_feature_files(dir)? {
        let key = file_key(dir, &path);
        match fs::read_to_string(&path) {
            Ok(text) => {
                let steps = extract_source(&key, &text);
                info!("parsed {} steps from {key}", steps.len());
                extraction.steps_by_file.insert(key, steps);
            }
            Err(err) => {
                warn!(path = %path, error = %err, "skipping unreadable feature file");
                extraction.issues.push(Issue::FileSkipped {
                    path: key,
                    reason: err.to_string(),
                });
            }
        }
    }
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "extraction tests use expect in setup")]

    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("/root/features", "/root/features/a.feature", "a.feature")]
    #[case("/root/features", "/root/features/web/login.feature", "web/login.feature")]
    #[case("/elsewhere", "/root/x.feature", "/root/x.feature")]
    fn file_keys_are_relative(#[case] root: &str, #[case] path: &str, #[case] expected: &str) {
        assert_eq!(file_key(Utf8Path::new(root), Utf8Path::new(path)), expected);
    }

    #[rstest]
    fn non_utf8_file_is_skipped_and_the_rest_kept() {
        let tmp = TempDir::new().expect("temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 temp dir");
        fs::write(
            root.join("ok.feature"),
            "Feature: Ok\n  Scenario: s\n    Given I am ready\n",
        )
        .expect("write ok.feature");
        fs::write(root.join("bad.feature"), [0xff, 0xfe, 0x00]).expect("write bad.feature");

        let extraction = extract_directory(root).expect("extraction");
        let files: Vec<&str> = extraction.steps_by_file.keys().map(String::as_str).collect();
        assert_eq!(files, vec!["ok.feature"]);
        assert_eq!(extraction.step_count(), 1);
        let [Issue::FileSkipped { path, reason }] = extraction.issues.as_slice() else {
            panic!("expected one skipped file, got {:?}", extraction.issues);
        };
        assert_eq!(path, "bad.feature");
        assert!(!reason.is_empty());
    }
}
