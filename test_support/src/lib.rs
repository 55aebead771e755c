//! Test utilities for feature trees and binary invocation.
//!
//! [`FeatureTree`] lays out `.feature` files in a temporary directory and
//! [`stepsmith::run_stepsmith_in`] runs the built binary against them.

pub mod stepsmith;
pub mod tree;

pub use tree::{FeatureTree, read_tree};

/// Directory of committed sample feature files used across test suites.
#[must_use]
pub fn sample_features() -> camino::Utf8PathBuf {
    camino::Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tests")
        .join("data")
        .join("features")
}
