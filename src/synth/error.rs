//! Errors raised while synthesising a single definition.
//!
//! Neither variant is fatal: the synthesiser skips the step and records an
//! issue.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use miette::Diagnostic;
use thiserror::Error;

/// A step that cannot become a definition.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SynthesisError {
    /// The pattern's capture groups do not line up with the signature.
    #[error("pattern {pattern} has {groups} capture groups but the signature has {parameters} captured parameters")]
    #[diagnostic(code(stepsmith::synth::arity_mismatch))]
    ArityMismatch {
        /// Offending pattern.
        pattern: String,
        /// Capture groups in the compiled pattern.
        groups: usize,
        /// Captured parameters in the signature.
        parameters: usize,
    },
    /// The pattern is not a valid regular expression.
    #[error("pattern {pattern} does not compile: {message}")]
    #[diagnostic(code(stepsmith::synth::invalid_pattern))]
    InvalidPattern {
        /// Offending pattern.
        pattern: String,
        /// Regex compiler message.
        message: String,
    },
}
