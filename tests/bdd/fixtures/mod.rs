//! Fixture state for BDD scenarios.
//!
//! Non-Clone types use `RefCell<Option<T>>` directly, while Clone types use
//! `Slot<T>`.

// The `#[fixture]` macro generates types that cannot have doc comments attached
#![allow(
    missing_docs,
    reason = "Generated fixture types cannot have doc comments attached"
)]

use rstest::fixture;
use rstest_bdd::Slot;
use std::cell::RefCell;
use stepsmith::config::GenerationConfig;
use stepsmith::runner::PipelineOutput;
use test_support::FeatureTree;

/// Combined test world for all BDD scenarios.
#[derive(Default)]
pub struct TestWorld {
    /// Temporary workspace holding the scenario's feature files.
    pub tree: RefCell<Option<FeatureTree>>,
    /// Configuration assembled by `Given` steps.
    pub config: RefCell<GenerationConfig>,
    /// Output of the last successful generation.
    pub output: RefCell<Option<PipelineOutput>>,
    /// Error text captured when generation fails.
    pub error: Slot<String>,
    /// Text of the last duplicate report.
    pub report: Slot<String>,
}

/// Fixture providing a fresh `TestWorld` for each scenario.
#[fixture]
pub fn world() -> TestWorld {
    TestWorld::default()
}

/// Helper trait extensions for `RefCell<Option<T>>`.
pub trait RefCellOptionExt<T> {
    /// Set the value inside the `RefCell`.
    fn set_value(&self, value: T);
    /// Borrow the inner value immutably and apply a function.
    fn with_ref<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R>;
}

impl<T> RefCellOptionExt<T> for RefCell<Option<T>> {
    fn set_value(&self, value: T) {
        *self.borrow_mut() = Some(value);
    }

    fn with_ref<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.borrow().as_ref().map(f)
    }
}

/// Strip surrounding double quotes from a string parameter.
#[must_use]
pub fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|stripped| stripped.strip_suffix('"'))
        .unwrap_or(s)
}
