//! Step-definition synthesis.
//!
//! A [`Synthesizer`] turns each bucket produced by
//! [`crate::organize::organize_steps`] into the definitions of one class.
//! Every definition gets an anchored match pattern, a signature derived from
//! the same token pass as the pattern, a method name unique within its
//! class, and a body rendered from the category's template.

mod error;
mod naming;
mod pattern;
mod template;
mod validate;

pub use error::SynthesisError;
pub use naming::{UsedNames, base_method_name};
pub use pattern::{Capture, MatchPattern, build_pattern};
pub use template::{TemplateError, TemplateSet, TemplateVars, process};
pub use validate::{merge_definitions, validate_definitions};

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::GenerationConfig;
use crate::diagnostics::Issue;
use crate::model::{Category, GeneratedDefinition, ParamType, Parameter, Signature, Step};
use crate::organize::Buckets;
use crate::render::java_escape;

/// Definitions grouped by class category.
pub type DefinitionsByCategory = BTreeMap<Category, Vec<GeneratedDefinition>>;

/// A method name that was suffixed to stay unique in its class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    /// Owning class category.
    pub category: Category,
    /// Name derived from the step text.
    pub from: String,
    /// Name actually used.
    pub to: String,
}

/// Outcome of synthesising every bucket.
#[derive(Debug, Default)]
pub struct Generation {
    /// Definitions per category; categories without definitions are absent.
    pub definitions: DefinitionsByCategory,
    /// Method names that were suffixed.
    pub renames: Vec<Rename>,
    /// Steps that produced no definition.
    pub issues: Vec<Issue>,
}

impl Generation {
    /// Total number of definitions.
    #[must_use]
    pub fn definition_count(&self) -> usize {
        self.definitions.values().map(Vec::len).sum()
    }
}

/// Builds definitions from categorised steps.
#[derive(Debug)]
pub struct Synthesizer<'a> {
    config: &'a GenerationConfig,
    templates: TemplateSet,
}

impl<'a> Synthesizer<'a> {
    /// Create a synthesiser using `templates` for method bodies.
    #[must_use]
    pub const fn new(config: &'a GenerationConfig, templates: TemplateSet) -> Self {
        Self { config, templates }
    }

    /// Synthesise one class per enabled, non-empty bucket.
    ///
    /// A step whose pattern and text match a definition already emitted in
    /// the same class is skipped before a method name is claimed.
    #[must_use]
    pub fn synthesize(&self, buckets: &Buckets) -> Generation {
        self.synthesize_with(buckets, |step| build_pattern(step.text()))
    }

    /// [`Self::synthesize`] with the pattern for each step supplied by `build`.
    pub(crate) fn synthesize_with(
        &self,
        buckets: &Buckets,
        build: impl Fn(&Step) -> MatchPattern,
    ) -> Generation {
        let mut generation = Generation::default();
        for (&category, steps) in buckets {
            if !self.config.generates(category) {
                debug!("generation disabled for {category}; skipping {} steps", steps.len());
                continue;
            }
            let mut names = UsedNames::new();
            let mut emitted: HashSet<(String, String)> = HashSet::new();
            let mut definitions = Vec::with_capacity(steps.len());
            for step in steps {
                let built = build(step);
                let key = (built.pattern().to_owned(), step.text().to_owned());
                if emitted.contains(&key) {
                    debug!(step = step.text(), "already defined in {category}; skipping");
                    continue;
                }
                match self.define(category, step, built, &mut names) {
                    Ok((definition, rename)) => {
                        emitted.insert(key);
                        generation.renames.extend(rename);
                        definitions.push(definition);
                    }
                    Err(err) => {
                        warn!(step = step.text(), error = %err, "skipping step definition");
                        generation.issues.push(Issue::DefinitionSkipped {
                            category,
                            step: step.text().to_owned(),
                            reason: err.to_string(),
                        });
                    }
                }
            }
            if definitions.is_empty() {
                continue;
            }
            info!("synthesised {} definitions for {category}", definitions.len());
            generation.definitions.insert(category, definitions);
        }
        generation
    }

    /// Synthesise the definition of `step` for the `category` class.
    ///
    /// The method name is claimed from `names` only when synthesis succeeds.
    ///
    /// # Errors
    /// Returns a [`SynthesisError`] when the pattern does not compile or its
    /// capture groups do not match the signature.
    pub fn synthesize_step(
        &self,
        category: Category,
        step: &Step,
        names: &mut UsedNames,
    ) -> Result<(GeneratedDefinition, Option<Rename>), SynthesisError> {
        self.define(category, step, build_pattern(step.text()), names)
    }

    fn define(
        &self,
        category: Category,
        step: &Step,
        built: MatchPattern,
        names: &mut UsedNames,
    ) -> Result<(GeneratedDefinition, Option<Rename>), SynthesisError> {
        let signature = signature_for(&built, step);
        built.verify(signature.arity())?;

        let base = base_method_name(step.text(), self.config.naming_convention);
        let method_name = names.claim(&base);
        let rename = (method_name != base).then(|| Rename {
            category,
            from: base,
            to: method_name.clone(),
        });

        let body = self.body_for(category, step, &method_name, &signature);
        let definition = GeneratedDefinition {
            method_name,
            match_pattern: built.into_pattern(),
            signature,
            body,
            class_name: category.class_name(),
            package: self.config.package_for(category),
            category,
            keyword: step.keyword(),
            original_text: step.text().to_owned(),
            output_path: self.config.output_path_for(category),
        };
        Ok((definition, rename))
    }

    fn body_for(
        &self,
        category: Category,
        step: &Step,
        method_name: &str,
        signature: &Signature,
    ) -> String {
        let logger_statement = format!(
            "logger.info(\"Executing {} step: {{}}\", \"{}\");",
            category.lower(),
            java_escape(step.text())
        );
        let vars = TemplateVars::from([
            ("methodName", method_name.to_owned()),
            ("stepText", step.text().to_owned()),
            ("category", category.as_str().to_owned()),
            ("stepType", category.as_str().to_owned()),
            ("parameters", signature.names()),
            ("loggerStatement", logger_statement),
        ]);
        process(self.templates.get(category), &vars)
    }
}

/// Captured parameters from the pattern, then block arguments.
fn signature_for(built: &MatchPattern, step: &Step) -> Signature {
    let captured = built
        .captures()
        .iter()
        .enumerate()
        .map(|(index, capture)| {
            let ty = match capture {
                Capture::Int => ParamType::Int,
                Capture::Text => ParamType::Text,
            };
            Parameter::new(format!("param{}", index + 1), ty)
        })
        .collect();
    let mut blocks = Vec::new();
    if step.takes_data_table() {
        blocks.push(Parameter::new("dataTable", ParamType::DataTable));
    }
    if step.takes_doc_string() {
        blocks.push(Parameter::new("docString", ParamType::DocString));
    }
    Signature::new(captured, blocks)
}
