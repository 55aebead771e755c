//! Duplicate detection and category bucketing.
//!
//! Identity throughout is [`Step`] equality, i.e. keyword plus normalised
//! text. A step used by two or more feature files is a duplicate and is
//! promoted into [`Category::Common`] regardless of its own category.

mod report;

pub use report::{organization_report, organization_suggestions};

use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::extract::StepsByFile;
use crate::model::{Category, Step};

/// Duplicated steps mapped to the distinct files that contain them.
pub type Duplicates = IndexMap<Step, Vec<String>>;

/// Deduplicated steps grouped by output category.
pub type Buckets = BTreeMap<Category, Vec<Step>>;

/// Find steps that occur in at least two distinct files.
///
/// The key of each entry is the first occurrence; the file list keeps the
/// order in which files first contained the step.
#[must_use]
pub fn find_duplicates(steps_by_file: &StepsByFile) -> Duplicates {
    let mut occurrences: IndexMap<&Step, IndexSet<&str>> = IndexMap::new();
    for (file, steps) in steps_by_file {
        for step in steps {
            occurrences.entry(step).or_default().insert(file.as_str());
        }
    }
    occurrences
        .into_iter()
        .filter(|(_, files)| files.len() > 1)
        .map(|(step, files)| {
            debug!(step = step.text(), files = files.len(), "duplicate step");
            (
                step.clone(),
                files.into_iter().map(str::to_owned).collect(),
            )
        })
        .collect()
}

/// First occurrence of every distinct step, in file then line order.
#[must_use]
pub fn unique_steps(steps_by_file: &StepsByFile) -> Vec<Step> {
    let unique: IndexSet<&Step> = steps_by_file.values().flatten().collect();
    unique.into_iter().cloned().collect()
}

/// Bucket distinct steps by category, forcing duplicates into COMMON.
///
/// Categories without steps are absent from the result.
#[must_use]
pub fn organize_steps(steps_by_file: &StepsByFile, duplicates: &Duplicates) -> Buckets {
    let mut buckets = Buckets::new();
    for step in unique_steps(steps_by_file) {
        let category = if duplicates.contains_key(&step) {
            Category::Common
        } else {
            step.category()
        };
        buckets.entry(category).or_default().push(step);
    }
    buckets
}
