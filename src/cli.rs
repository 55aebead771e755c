//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure and its subcommands.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

use crate::config::{GenerationConfig, NamingConvention};

/// Generate Cucumber step-definition skeletons from Gherkin feature files.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON or YAML generation config; CLI flags override its values.
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments accepted by the `generate` command.
#[derive(Debug, Args, PartialEq, Eq, Clone, Default)]
pub struct GenerateArgs {
    /// Directory containing `.feature` files.
    #[arg(value_name = "FEATURES")]
    pub features: Utf8PathBuf,

    /// Root directory for generated Java sources.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<Utf8PathBuf>,

    /// Base Java package for generated classes.
    #[arg(short, long, value_name = "PACKAGE")]
    pub package: Option<String>,

    /// Directory of `<category>.template` body overrides.
    #[arg(long, value_name = "DIR")]
    pub template_dir: Option<Utf8PathBuf>,

    /// Method naming convention.
    #[arg(long, value_enum, value_name = "CONV")]
    pub naming: Option<NamingConvention>,

    /// Do not generate the WEB class.
    #[arg(long)]
    pub no_web: bool,

    /// Do not generate the API class.
    #[arg(long)]
    pub no_api: bool,

    /// Do not generate the MOBILE class.
    #[arg(long)]
    pub no_mobile: bool,

    /// Do not generate the COMMON class.
    #[arg(long)]
    pub no_common: bool,

    /// Do not write the JSON report.
    #[arg(long)]
    pub no_reports: bool,

    /// Print the summary without writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Apply these flags on top of `config`.
    pub fn apply(&self, config: &mut GenerationConfig) {
        if let Some(output) = &self.output {
            config.output_directory.clone_from(output);
        }
        if let Some(package) = &self.package {
            config.base_package.clone_from(package);
        }
        if let Some(dir) = &self.template_dir {
            config.template_directory = Some(dir.clone());
        }
        if let Some(naming) = self.naming {
            config.naming_convention = naming;
        }
        config.generate_web &= !self.no_web;
        config.generate_api &= !self.no_api;
        config.generate_mobile &= !self.no_mobile;
        config.generate_common &= !self.no_common;
        config.generate_reports &= !self.no_reports;
    }
}

/// Arguments accepted by the `duplicates` command.
#[derive(Debug, Args, PartialEq, Eq, Clone)]
pub struct DuplicatesArgs {
    /// Directory containing `.feature` files.
    #[arg(value_name = "FEATURES")]
    pub features: Utf8PathBuf,
}

/// Available top-level commands.
#[derive(Debug, Subcommand, PartialEq, Eq, Clone)]
pub enum Commands {
    /// Generate step-definition classes for every feature file.
    Generate(GenerateArgs),

    /// Report steps duplicated across feature files.
    Duplicates(DuplicatesArgs),
}
