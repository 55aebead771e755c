//! Generation settings.
//!
//! [`GenerationConfig`] deserialises from JSON or YAML with camelCase keys.
//! Every field has a default, so a config file only needs the keys it
//! changes. CLI flags are applied on top by the runner.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use clap::ValueEnum;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Category;

/// How method identifiers are joined from words.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NamingConvention {
    /// `clickTheButton`
    #[default]
    CamelCase,
    /// `ClickTheButton`
    PascalCase,
    /// `click_the_button`
    SnakeCase,
    /// `click-the-button`
    KebabCase,
}

/// Settings controlling what is generated and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Root directory for generated sources.
    pub output_directory: Utf8PathBuf,
    /// Package prefix; each class lives in `<basePackage>.<category>`.
    pub base_package: String,
    /// Directory of `<category>.template` overrides.
    pub template_directory: Option<Utf8PathBuf>,
    /// Generate the WEB class.
    pub generate_web: bool,
    /// Generate the API class.
    pub generate_api: bool,
    /// Generate the MOBILE class.
    pub generate_mobile: bool,
    /// Generate the COMMON class.
    pub generate_common: bool,
    /// Method naming convention.
    pub naming_convention: NamingConvention,
    /// Check generated classes for duplicate annotations and names.
    pub validate_steps: bool,
    /// Write the JSON report next to the generated sources.
    pub generate_reports: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            output_directory: Utf8PathBuf::from("src/test/java/stepdefinitions"),
            base_package: "com.testautomation.stepdefinitions".to_owned(),
            template_directory: None,
            generate_web: true,
            generate_api: true,
            generate_mobile: true,
            generate_common: true,
            naming_convention: NamingConvention::default(),
            validate_steps: true,
            generate_reports: true,
        }
    }
}

impl GenerationConfig {
    /// Whether the class for `category` is enabled.
    #[must_use]
    pub const fn generates(&self, category: Category) -> bool {
        match category {
            Category::Api => self.generate_api,
            Category::Mobile => self.generate_mobile,
            Category::Web => self.generate_web,
            Category::Common => self.generate_common,
        }
    }

    /// Java package for `category`.
    #[must_use]
    pub fn package_for(&self, category: Category) -> String {
        if self.base_package.is_empty() {
            category.lower().to_owned()
        } else {
            format!("{}.{}", self.base_package, category.lower())
        }
    }

    /// Path of the class file for `category`.
    #[must_use]
    pub fn output_path_for(&self, category: Category) -> Utf8PathBuf {
        let mut path = self.output_directory.clone();
        for segment in self.package_for(category).split('.') {
            path.push(segment);
        }
        path.push(format!("{}.java", category.class_name()));
        path
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}")]
    #[diagnostic(code(stepsmith::config::read))]
    Read {
        /// Config path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The JSON document is invalid.
    #[error("invalid JSON config {path}: {source}")]
    #[diagnostic(code(stepsmith::config::json))]
    Json {
        /// Config path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The YAML document is invalid.
    #[error("invalid YAML config {path}: {message}")]
    #[diagnostic(code(stepsmith::config::yaml))]
    Yaml {
        /// Config path.
        path: Utf8PathBuf,
        /// Parser message.
        message: String,
    },
    /// The extension is neither JSON nor YAML.
    #[error("unsupported config format: {path}")]
    #[diagnostic(
        code(stepsmith::config::unsupported_format),
        help("use a .json, .yaml or .yml file")
    )]
    UnsupportedFormat {
        /// Config path.
        path: Utf8PathBuf,
    },
}

/// Parse configuration text according to the file extension of `path`.
///
/// # Errors
/// Returns a [`ConfigError`] when the extension is unknown or the document
/// does not match [`GenerationConfig`].
pub fn parse(path: &Utf8Path, text: &str) -> Result<GenerationConfig, ConfigError> {
    match path.extension().map(str::to_ascii_lowercase).as_deref() {
        Some("json") => serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        }),
        Some("yaml" | "yml") => serde_saphyr::from_str(text).map_err(|e| ConfigError::Yaml {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Load configuration from `path`.
///
/// # Errors
/// Returns a [`ConfigError`] when the file cannot be read or parsed.
pub fn load(path: &Utf8Path) -> Result<GenerationConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, &text)
}
