//! Run reports.
//!
//! [`RunReport`] is the serialisable summary of a generation run. It carries
//! no timestamps, so identical inputs yield identical JSON.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use std::fmt::{self, Display, Formatter};
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::diagnostics::Issue;
use crate::extract::StepsByFile;
use crate::hasher::DefinitionHasher;
use crate::model::{Category, Keyword};
use crate::organize::{Duplicates, unique_steps};
use crate::synth::{DefinitionsByCategory, Rename};

/// A step found in several files.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateEntry {
    /// Step keyword.
    pub keyword: Keyword,
    /// Text of the first occurrence.
    pub text: String,
    /// Category the classifier assigned before promotion.
    pub category: Category,
    /// Files containing the step.
    pub files: Vec<String>,
}

/// One generated method.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionEntry {
    /// Method name.
    pub method_name: String,
    /// Annotation keyword.
    pub keyword: Keyword,
    /// Match pattern.
    pub pattern: String,
    /// Rendered parameter list.
    pub signature: String,
    /// Step text it was generated from.
    pub original_text: String,
}

/// One generated class.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassReport {
    /// Class category.
    pub category: Category,
    /// Class name.
    pub class_name: String,
    /// Java package.
    pub package: String,
    /// Destination file.
    pub output_path: Utf8PathBuf,
    /// Digest of the class's definitions.
    pub digest: String,
    /// Methods in declaration order.
    pub definitions: Vec<DefinitionEntry>,
}

/// Summary of a generation run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Step count per feature file.
    pub feature_files: IndexMap<String, usize>,
    /// Steps across all files.
    pub total_steps: usize,
    /// Distinct steps across all files.
    pub unique_steps: usize,
    /// Steps shared between files.
    pub duplicates: Vec<DuplicateEntry>,
    /// Generated classes.
    pub classes: Vec<ClassReport>,
    /// Method names that were suffixed.
    pub renames: Vec<Rename>,
    /// Recoverable problems.
    pub issues: Vec<Issue>,
}

impl RunReport {
    /// Assemble the report from the pipeline's outputs.
    #[must_use]
    pub fn new(
        steps_by_file: &StepsByFile,
        duplicates: &Duplicates,
        definitions: &DefinitionsByCategory,
        renames: &[Rename],
        issues: &[Issue],
    ) -> Self {
        let feature_files = steps_by_file
            .iter()
            .map(|(file, steps)| (file.clone(), steps.len()))
            .collect();
        let duplicates = duplicates
            .iter()
            .map(|(step, files)| DuplicateEntry {
                keyword: step.keyword(),
                text: step.text().to_owned(),
                category: step.category(),
                files: files.clone(),
            })
            .collect();
        let classes = definitions
            .iter()
            .filter_map(|(&category, defs)| {
                let first = defs.first()?;
                Some(ClassReport {
                    category,
                    class_name: first.class_name().to_owned(),
                    package: first.package().to_owned(),
                    output_path: first.output_path().clone(),
                    digest: DefinitionHasher::hash(defs),
                    definitions: defs
                        .iter()
                        .map(|def| DefinitionEntry {
                            method_name: def.method_name().to_owned(),
                            keyword: def.keyword(),
                            pattern: def.match_pattern().to_owned(),
                            signature: def.signature().to_string(),
                            original_text: def.original_text().to_owned(),
                        })
                        .collect(),
                })
            })
            .collect();
        Self {
            feature_files,
            total_steps: steps_by_file.values().map(Vec::len).sum(),
            unique_steps: unique_steps(steps_by_file).len(),
            duplicates,
            classes,
            renames: renames.to_vec(),
            issues: issues.to_vec(),
        }
    }

    /// Total generated methods.
    #[must_use]
    pub fn definition_count(&self) -> usize {
        self.classes.iter().map(|class| class.definitions.len()).sum()
    }

    /// Console rendering of the report.
    #[must_use]
    pub fn console_summary(&self) -> String {
        ConsoleSummary(self).to_string()
    }
}

struct ConsoleSummary<'a>(&'a RunReport);

impl Display for ConsoleSummary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let rule = "=".repeat(80);
        let thin = "-".repeat(40);
        writeln!(f, "{rule}")?;
        writeln!(f, "STEP DEFINITION GENERATION REPORT")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "SUMMARY:\n{thin}")?;
        writeln!(f, "{:<22}: {}", "Total Feature Files", report.feature_files.len())?;
        writeln!(f, "{:<22}: {}", "Total Steps", report.total_steps)?;
        writeln!(f, "{:<22}: {}", "Unique Steps", report.unique_steps)?;
        writeln!(f, "{:<22}: {}", "Duplicate Steps", report.duplicates.len())?;
        writeln!(f, "{:<22}: {}", "Generated Definitions", report.definition_count())?;
        writeln!(f)?;
        writeln!(f, "FEATURE FILES:\n{thin}")?;
        for (file, steps) in &report.feature_files {
            writeln!(f, "{file:<30}: {steps} steps")?;
        }
        writeln!(f)?;
        writeln!(f, "GENERATED DEFINITIONS:\n{thin}")?;
        for class in &report.classes {
            writeln!(f, "{:<22}: {} methods", class.class_name, class.definitions.len())?;
        }
        if !report.duplicates.is_empty() {
            writeln!(f)?;
            writeln!(f, "DUPLICATE STEPS:\n{thin}")?;
            for dup in &report.duplicates {
                writeln!(f, "{} {}", dup.keyword, dup.text)?;
                writeln!(f, "  Found in: {}", dup.files.join(", "))?;
            }
        }
        if !report.issues.is_empty() {
            writeln!(f)?;
            writeln!(f, "ISSUES:\n{thin}")?;
            for issue in &report.issues {
                writeln!(f, "- {issue}")?;
            }
        }
        writeln!(f, "{rule}")
    }
}

/// Errors raised while writing a report.
#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    /// The report could not be serialised.
    #[error("failed to serialise report")]
    #[diagnostic(code(stepsmith::report::serialize))]
    Serialize(#[source] serde_json::Error),
    /// The report file could not be written.
    #[error("failed to write report {path}")]
    #[diagnostic(code(stepsmith::report::write))]
    Write {
        /// Destination.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Write `report` as pretty-printed JSON, creating parent directories.
///
/// # Errors
/// Returns a [`ReportError`] when serialisation or writing fails.
pub fn write_json_report(report: &RunReport, path: &Utf8Path) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(report).map_err(ReportError::Serialize)?;
    let write_err = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, json + "\n").map_err(write_err)?;
    info!(path = %path, "wrote JSON report");
    Ok(())
}
