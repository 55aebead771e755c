//! CLI execution and command dispatch logic.
//!
//! This module keeps `main` minimal by providing a single entry point that
//! handles command execution. [`Pipeline::run`] is the side-effect-free core
//! both subcommands share; writing files and printing happen here only.

mod error;
mod writer;

pub use error::RunnerError;
pub use writer::{write_class_file, write_stdout};

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info, warn};

use crate::cli::{Cli, Commands, DuplicatesArgs, GenerateArgs};
use crate::config::{self, GenerationConfig};
use crate::diagnostics::Issue;
use crate::extract::{StepsByFile, extract_directory};
use crate::model::Category;
use crate::organize::{
    Buckets, Duplicates, find_duplicates, organization_report, organization_suggestions,
    organize_steps,
};
use crate::render::render_class;
use crate::report::{RunReport, write_json_report};
use crate::synth::{
    DefinitionsByCategory, Rename, Synthesizer, TemplateSet, merge_definitions,
    validate_definitions,
};

/// Directory under the output root holding reports.
pub const REPORTS_DIR: &str = "reports";
/// File name of the JSON report.
pub const REPORT_FILE: &str = "step_definition_report.json";

/// Wrapper around generated Java class text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSource(String);

impl ClassSource {
    /// Store the provided class source.
    #[must_use]
    pub const fn new(content: String) -> Self {
        Self(content)
    }
    /// Borrow the underlying source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A rendered class and its destination.
#[derive(Debug, Clone)]
pub struct RenderedClass {
    /// Category of the class.
    pub category: Category,
    /// Destination file.
    pub path: Utf8PathBuf,
    /// Java source.
    pub source: ClassSource,
}

/// Everything one pipeline run produced, in memory.
#[derive(Debug, Default)]
pub struct PipelineOutput {
    /// Steps per feature file.
    pub steps_by_file: StepsByFile,
    /// Steps shared between files.
    pub duplicates: Duplicates,
    /// Deduplicated steps per category.
    pub buckets: Buckets,
    /// Definitions per category after merging.
    pub definitions: DefinitionsByCategory,
    /// Method names that were suffixed.
    pub renames: Vec<Rename>,
    /// Recoverable problems, in the order they were found.
    pub issues: Vec<Issue>,
    /// Rendered class files.
    pub classes: Vec<RenderedClass>,
}

impl PipelineOutput {
    /// Summarise this output as a [`RunReport`].
    #[must_use]
    pub fn report(&self) -> RunReport {
        RunReport::new(
            &self.steps_by_file,
            &self.duplicates,
            &self.definitions,
            &self.renames,
            &self.issues,
        )
    }
}

/// The in-memory generation pipeline.
pub struct Pipeline;

impl Pipeline {
    /// Extract, organise, synthesise, and render without touching the output
    /// directory.
    ///
    /// # Errors
    /// Returns a [`RunnerError`] when the feature directory is missing, a
    /// template override cannot be read, or a class fails to render.
    pub fn run(
        features: &Utf8Path,
        config: &GenerationConfig,
    ) -> Result<PipelineOutput, RunnerError> {
        let extraction = extract_directory(features)?;
        let mut issues = extraction.issues;
        let steps_by_file = extraction.steps_by_file;
        info!(
            "extracted {} steps from {} files",
            steps_by_file.values().map(Vec::len).sum::<usize>(),
            steps_by_file.len()
        );

        let duplicates = find_duplicates(&steps_by_file);
        let buckets = organize_steps(&steps_by_file, &duplicates);
        let templates = load_templates(config, &mut issues)?;

        let generation = Synthesizer::new(config, templates).synthesize(&buckets);
        issues.extend(generation.issues);
        for rename in &generation.renames {
            debug!("renamed {} to {} in {}", rename.from, rename.to, rename.category);
        }

        let definitions: DefinitionsByCategory = generation
            .definitions
            .into_iter()
            .map(|(category, defs)| (category, merge_definitions(defs)))
            .collect();
        if config.validate_steps {
            for defs in definitions.values() {
                issues.extend(validate_definitions(defs));
            }
        }

        let classes = definitions
            .iter()
            .map(|(&category, defs)| -> Result<RenderedClass, RunnerError> {
                let source = render_class(config, category, defs)?;
                Ok(RenderedClass {
                    category,
                    path: config.output_path_for(category),
                    source: ClassSource::new(source),
                })
            })
            .collect::<Result<Vec<_>, RunnerError>>()?;

        Ok(PipelineOutput {
            steps_by_file,
            duplicates,
            buckets,
            definitions,
            renames: generation.renames,
            issues,
            classes,
        })
    }
}

fn load_templates(
    config: &GenerationConfig,
    issues: &mut Vec<Issue>,
) -> Result<TemplateSet, RunnerError> {
    let mut templates = TemplateSet::defaults();
    if let Some(dir) = &config.template_directory {
        if dir.is_dir() {
            let loaded = templates.load_dir(dir)?;
            debug!("loaded {} template overrides from {dir}", loaded.len());
        } else {
            warn!(path = %dir, "template directory does not exist");
            issues.push(Issue::TemplateDirMissing {
                path: dir.to_string(),
            });
        }
    }
    Ok(templates)
}

fn load_config(cli: &Cli) -> Result<GenerationConfig> {
    cli.config.as_deref().map_or_else(
        || Ok(GenerationConfig::default()),
        |path| config::load(path).with_context(|| format!("load config {path}")),
    )
}

/// Execute the parsed [`Cli`] command.
///
/// # Errors
/// Returns an error if configuration, extraction, generation, or writing
/// fails.
pub fn run(cli: &Cli) -> Result<()> {
    let mut config = load_config(cli)?;
    match &cli.command {
        Commands::Generate(args) => {
            args.apply(&mut config);
            handle_generate(args, &config)
        }
        Commands::Duplicates(args) => handle_duplicates(args),
    }
}

fn handle_generate(args: &GenerateArgs, config: &GenerationConfig) -> Result<()> {
    let output = Pipeline::run(&args.features, config)
        .with_context(|| format!("generate step definitions from {}", args.features))?;
    let report = output.report();

    if args.dry_run {
        info!("dry run; no files written");
    } else {
        for class in &output.classes {
            write_class_file(&class.path, &class.source)?;
        }
        if config.generate_reports {
            let path = config.output_directory.join(REPORTS_DIR).join(REPORT_FILE);
            write_json_report(&report, &path).with_context(|| format!("write report {path}"))?;
        }
    }

    for issue in &output.issues {
        warn!("{issue}");
    }
    write_stdout(&report.console_summary())?;
    write_stdout(&organization_suggestions(&output.duplicates))
}

fn handle_duplicates(args: &DuplicatesArgs) -> Result<()> {
    let extraction = extract_directory(&args.features)
        .with_context(|| format!("extract steps from {}", args.features))?;
    for issue in &extraction.issues {
        warn!("{issue}");
    }
    let duplicates = find_duplicates(&extraction.steps_by_file);
    let buckets = organize_steps(&extraction.steps_by_file, &duplicates);
    write_stdout(&organization_report(&duplicates, &buckets))
}
