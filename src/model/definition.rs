//! Generated step definitions.

use std::fmt;

use camino::Utf8PathBuf;
use serde::Serialize;

use super::{Category, Keyword};

/// Java type of a signature parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// `int`, captured by `(\d+)`.
    Int,
    /// `String`, captured by `"([^"]+)"`.
    Text,
    /// `DataTable` block argument.
    DataTable,
    /// `String` doc-string block argument.
    DocString,
}

impl ParamType {
    /// Type name as written in the Java signature.
    #[must_use]
    pub const fn java_type(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Text | Self::DocString => "String",
            Self::DataTable => "DataTable",
        }
    }
}

/// One typed signature parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Parameter {
    name: String,
    ty: ParamType,
}

impl Parameter {
    /// Create a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Parameter identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter type.
    #[must_use]
    pub const fn ty(&self) -> ParamType {
        self.ty
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty.java_type(), self.name)
    }
}

/// Ordered method signature.
///
/// Captured parameters correspond one-to-one with the capture groups of the
/// match pattern. Block arguments are passed by the framework after them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Signature {
    captured: Vec<Parameter>,
    blocks: Vec<Parameter>,
}

impl Signature {
    /// Create a signature from captured and block parameters.
    #[must_use]
    pub const fn new(captured: Vec<Parameter>, blocks: Vec<Parameter>) -> Self {
        Self { captured, blocks }
    }

    /// Parameters bound to capture groups.
    #[must_use]
    pub fn captured(&self) -> &[Parameter] {
        &self.captured
    }

    /// Trailing block arguments.
    #[must_use]
    pub fn blocks(&self) -> &[Parameter] {
        &self.blocks
    }

    /// Number of captured parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.captured.len()
    }

    /// All parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.captured.iter().chain(&self.blocks)
    }

    /// Comma-joined parameter names.
    #[must_use]
    pub fn names(&self) -> String {
        itertools::join(self.iter().map(Parameter::name), ", ")
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", itertools::join(self.iter(), ", "))
    }
}

/// One synthesised step definition.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDefinition {
    pub(crate) method_name: String,
    pub(crate) match_pattern: String,
    pub(crate) signature: Signature,
    pub(crate) body: String,
    pub(crate) class_name: String,
    pub(crate) package: String,
    pub(crate) category: Category,
    pub(crate) keyword: Keyword,
    pub(crate) original_text: String,
    pub(crate) output_path: Utf8PathBuf,
}

impl GeneratedDefinition {
    /// Method identifier, unique within its class.
    #[must_use]
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Anchored regular expression matching the step text.
    #[must_use]
    pub fn match_pattern(&self) -> &str {
        &self.match_pattern
    }

    /// Method signature.
    #[must_use]
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Rendered method body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Owning class name.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Java package of the owning class.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Category of the owning class.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Annotation keyword.
    #[must_use]
    pub const fn keyword(&self) -> Keyword {
        self.keyword
    }

    /// Step text the definition was generated from.
    #[must_use]
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// Path of the class file containing this definition.
    #[must_use]
    pub const fn output_path(&self) -> &Utf8PathBuf {
        &self.output_path
    }

    /// Identity used when merging: pattern and original text.
    #[must_use]
    pub fn merge_key(&self) -> (&str, &str) {
        (&self.match_pattern, &self.original_text)
    }

    /// Annotation identity: keyword and pattern.
    #[must_use]
    pub fn annotation(&self) -> String {
        format!("@{}(\"{}\")", self.keyword, self.match_pattern)
    }
}
