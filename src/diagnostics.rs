//! Recoverable issues accumulated during a run.
//!
//! Fatal problems are returned as errors. Everything a run can survive is
//! recorded as an [`Issue`] and reported once the run finishes.

use std::fmt;

use serde::Serialize;

use crate::model::Category;

/// A problem that did not stop the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// A feature file could not be read.
    FileSkipped {
        /// Path of the file.
        path: String,
        /// Underlying error message.
        reason: String,
    },
    /// A step did not yield a definition.
    DefinitionSkipped {
        /// Class the definition was meant for.
        category: Category,
        /// Step text.
        step: String,
        /// Why synthesis failed.
        reason: String,
    },
    /// The configured template directory does not exist.
    TemplateDirMissing {
        /// Configured path.
        path: String,
    },
    /// Two definitions in one class share an annotation.
    DuplicateAnnotation {
        /// Class name.
        class: String,
        /// Annotation text.
        annotation: String,
    },
    /// Two definitions in one class share a method name.
    DuplicateMethod {
        /// Class name.
        class: String,
        /// Method name.
        method: String,
    },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileSkipped { path, reason } => write!(f, "skipped {path}: {reason}"),
            Self::DefinitionSkipped {
                category,
                step,
                reason,
            } => write!(f, "no {category} definition for '{step}': {reason}"),
            Self::TemplateDirMissing { path } => {
                write!(f, "template directory {path} not found; using built-in templates")
            }
            Self::DuplicateAnnotation { class, annotation } => {
                write!(f, "duplicate step definition in {class}: {annotation}")
            }
            Self::DuplicateMethod { class, method } => {
                write!(f, "duplicate method name in {class}: {method}")
            }
        }
    }
}
