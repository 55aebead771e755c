//! Method-body templates.
//!
//! Templates use `{identifier}` placeholders. Substitution is a single
//! left-to-right pass: a placeholder whose key is present is replaced by its
//! value verbatim, values are never scanned again, and anything else in
//! braces is copied through unchanged. That keeps Java snippets such as the
//! slf4j `{}` marker intact.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use std::collections::{BTreeMap, HashMap};
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::Category;

/// Placeholder values for one template expansion.
pub type TemplateVars = HashMap<&'static str, String>;

/// Errors raised while loading template overrides.
#[derive(Debug, Error, Diagnostic)]
pub enum TemplateError {
    /// A directory listing or template file could not be read.
    #[error("failed to read template {path}")]
    #[diagnostic(code(stepsmith::template::read))]
    Read {
        /// Path being read.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

fn read_error(path: &Utf8Path, source: std::io::Error) -> TemplateError {
    TemplateError::Read {
        path: path.to_path_buf(),
        source,
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Substitute `{identifier}` placeholders in `template` from `vars`.
///
/// # Examples
/// ```
/// use stepsmith::synth::{TemplateVars, process};
///
/// let vars = TemplateVars::from([("methodName", "{stepText}".to_owned())]);
/// assert_eq!(
///     process("call {methodName} with {} and {unknown}", &vars),
///     "call {stepText} with {} and {unknown}"
/// );
/// ```
#[must_use]
pub fn process(template: &str, vars: &TemplateVars) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len());
    let mut i = 0;
    while let Some(&ch) = chars.get(i) {
        if ch == '{'
            && let Some((value, skip)) = placeholder_at(&chars, i, vars)
        {
            out.push_str(value);
            i += skip;
        } else {
            out.push(ch);
            i += 1;
        }
    }
    out
}

/// Value and consumed length of a known placeholder opening at `pos`.
fn placeholder_at<'a>(
    chars: &[char],
    pos: usize,
    vars: &'a TemplateVars,
) -> Option<(&'a str, usize)> {
    let name: String = chars
        .get(pos + 1..)?
        .iter()
        .take_while(|c| is_identifier_char(**c))
        .collect();
    if name.is_empty() || chars.get(pos + 1 + name.len()) != Some(&'}') {
        return None;
    }
    match vars.get(name.as_str()) {
        Some(value) => Some((value.as_str(), name.len() + 2)),
        None => {
            debug!(placeholder = %name, "unresolved template placeholder left verbatim");
            None
        }
    }
}

const WEB_TEMPLATE: &str = concat!(
    "// TODO: Implement web automation logic\n",
    "// Example: driver.findElement(By.xpath(\"//button[@id='submit']\")).click();\n",
    "{loggerStatement}\n",
    "throw new UnsupportedOperationException(\"Step not implemented yet\");",
);

const API_TEMPLATE: &str = concat!(
    "// TODO: Implement API automation logic\n",
    "// Example: response = request.when().get(\"/api/endpoint\");\n",
    "{loggerStatement}\n",
    "throw new UnsupportedOperationException(\"Step not implemented yet\");",
);

const MOBILE_TEMPLATE: &str = concat!(
    "// TODO: Implement mobile automation logic\n",
    "// Example: driver.findElement(By.id(\"button\")).click();\n",
    "{loggerStatement}\n",
    "throw new UnsupportedOperationException(\"Step not implemented yet\");",
);

const COMMON_TEMPLATE: &str = concat!(
    "// TODO: Implement common step logic\n",
    "{loggerStatement}\n",
    "throw new UnsupportedOperationException(\"Step not implemented yet\");",
);

/// Method-body templates keyed by category.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: BTreeMap<Category, String>,
}

impl TemplateSet {
    /// Built-in templates, one per category.
    #[must_use]
    pub fn defaults() -> Self {
        let templates = [
            (Category::Api, API_TEMPLATE),
            (Category::Mobile, MOBILE_TEMPLATE),
            (Category::Web, WEB_TEMPLATE),
            (Category::Common, COMMON_TEMPLATE),
        ]
        .into_iter()
        .map(|(category, body)| (category, body.to_owned()))
        .collect();
        Self { templates }
    }

    /// An empty set; every lookup falls back to the built-in COMMON body.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    /// Replace the template for `category`.
    pub fn insert(&mut self, category: Category, template: impl Into<String>) {
        self.templates.insert(category, template.into());
    }

    /// Template for `category`, falling back to COMMON.
    #[must_use]
    pub fn get(&self, category: Category) -> &str {
        self.templates
            .get(&category)
            .or_else(|| self.templates.get(&Category::Common))
            .map_or(COMMON_TEMPLATE, String::as_str)
    }

    /// Override templates from `<category>.template` files in `dir`.
    ///
    /// File stems match categories case-insensitively; other files are
    /// ignored. Returns the categories that were overridden.
    ///
    /// # Errors
    /// Returns [`TemplateError::Read`] when the directory or a template file
    /// cannot be read.
    pub fn load_dir(&mut self, dir: &Utf8Path) -> Result<Vec<Category>, TemplateError> {
        let mut paths: Vec<Utf8PathBuf> = dir
            .read_dir_utf8()
            .map_err(|source| read_error(dir, source))?
            .filter_map(|entry| entry.ok().map(|e| e.into_path()))
            .filter(|path| path.extension() == Some("template"))
            .collect();
        paths.sort();

        let mut loaded = Vec::new();
        for path in paths {
            let Some(category) = path.file_stem().and_then(Category::from_tag) else {
                debug!(path = %path, "ignoring template for unknown category");
                continue;
            };
            let body = fs::read_to_string(&path).map_err(|source| read_error(&path, source))?;
            info!(path = %path, "loaded template for {category}");
            self.insert(category, body);
            loaded.push(category);
        }
        Ok(loaded)
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::defaults()
    }
}
