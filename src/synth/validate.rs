//! Merging and conflict checks over generated definitions.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::diagnostics::Issue;
use crate::model::GeneratedDefinition;

/// Drop definitions equal by pattern and original text, keeping the first.
#[must_use]
pub fn merge_definitions(definitions: Vec<GeneratedDefinition>) -> Vec<GeneratedDefinition> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    definitions
        .into_iter()
        .filter(|definition| {
            let (pattern, text) = definition.merge_key();
            seen.insert((pattern.to_owned(), text.to_owned()))
        })
        .collect()
}

/// Report duplicate annotations and method names within each class.
///
/// Each duplicated annotation or name is reported once.
#[must_use]
pub fn validate_definitions(definitions: &[GeneratedDefinition]) -> Vec<Issue> {
    let mut annotations: IndexMap<(&str, String), usize> = IndexMap::new();
    let mut methods: IndexMap<(&str, &str), usize> = IndexMap::new();
    for definition in definitions {
        let class = definition.class_name();
        *annotations.entry((class, definition.annotation())).or_default() += 1;
        *methods.entry((class, definition.method_name())).or_default() += 1;
    }

    let duplicate_annotations = annotations
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|((class, annotation), _)| Issue::DuplicateAnnotation {
            class: class.to_owned(),
            annotation,
        });
    let duplicate_methods = methods
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|((class, method), _)| Issue::DuplicateMethod {
            class: class.to_owned(),
            method: method.to_owned(),
        });
    duplicate_annotations.chain(duplicate_methods).collect()
}
