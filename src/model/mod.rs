//! Core data model for extracted steps.
//!
//! A [`Step`] is created once per parse pass and never mutated. Its
//! [`Category`] and identity [`StepKey`] are derived at construction so every
//! later stage sees the same values.

mod definition;

pub use definition::{GeneratedDefinition, ParamType, Parameter, Signature};

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::classify::classify;
use crate::normalize::normalize;
use crate::tokens::{Token, block_mentions, tokenize};

/// Step keyword introducing a step line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Keyword {
    /// `Given`
    Given,
    /// `When`
    When,
    /// `Then`
    Then,
    /// `And`
    And,
    /// `But`
    But,
}

impl Keyword {
    /// All keywords in declaration order.
    pub const ALL: [Self; 5] = [Self::Given, Self::When, Self::Then, Self::And, Self::But];

    /// Keyword spelling as it appears in feature files and annotations.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }

    /// Split a trimmed line into its keyword and the remaining step text.
    ///
    /// The keyword must be followed by whitespace and non-empty text.
    ///
    /// # Examples
    /// ```
    /// use stepsmith::model::Keyword;
    ///
    /// assert_eq!(
    ///     Keyword::split_line("Given a user"),
    ///     Some((Keyword::Given, "a user"))
    /// );
    /// assert_eq!(Keyword::split_line("Givena user"), None);
    /// assert_eq!(Keyword::split_line("Then   "), None);
    /// ```
    #[must_use]
    pub fn split_line(line: &str) -> Option<(Self, &str)> {
        Self::ALL.into_iter().find_map(|keyword| {
            let rest = line.strip_prefix(keyword.as_str())?;
            if !rest.starts_with(char::is_whitespace) {
                return None;
            }
            let text = rest.trim();
            (!text.is_empty()).then_some((keyword, text))
        })
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output category of a step; one generated class per category.
///
/// The declaration order fixes iteration order wherever categories key an
/// ordered map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// HTTP and service steps.
    Api,
    /// Device and app steps.
    Mobile,
    /// Browser and page steps.
    Web,
    /// Shared steps, including every cross-file duplicate.
    Common,
}

impl Category {
    /// All categories in iteration order.
    pub const ALL: [Self; 4] = [Self::Api, Self::Mobile, Self::Web, Self::Common];

    /// Upper-case tag, e.g. `API`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "API",
            Self::Mobile => "MOBILE",
            Self::Web => "WEB",
            Self::Common => "COMMON",
        }
    }

    /// Lower-case tag used for package segments and template file stems.
    #[must_use]
    pub const fn lower(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Mobile => "mobile",
            Self::Web => "web",
            Self::Common => "common",
        }
    }

    /// Parse a tag case-insensitively.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(tag))
    }

    /// Name of the generated class for this category.
    #[must_use]
    pub fn class_name(self) -> String {
        format!("{}StepDefinitions", self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural block that may follow a step line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockArgument {
    /// A run of `| ... |` table rows.
    DataTable,
    /// A `"""` or ```` ``` ```` delimited block.
    DocString,
}

/// Literal value or block marker extracted from step text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StepParameter {
    /// Contents of a double-quoted literal.
    Quoted(String),
    /// A bare integer.
    Integer(String),
    /// The step takes a data table.
    DataTable,
    /// The step takes a doc string.
    DocString,
}

/// Identity of a step: keyword plus normalised text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepKey {
    keyword: Keyword,
    normalized: String,
}

impl StepKey {
    /// Keyword half of the key.
    #[must_use]
    pub const fn keyword(&self) -> Keyword {
        self.keyword
    }

    /// Normalised step text.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

/// One step line from a feature file.
///
/// Equality and hashing use [`StepKey`], so two steps that differ only in
/// literal values or letter case compare equal.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    keyword: Keyword,
    text: String,
    parameters: Vec<StepParameter>,
    source_file: String,
    line_number: usize,
    block: Option<BlockArgument>,
    category: Category,
    #[serde(skip)]
    key: StepKey,
}

impl Step {
    /// Build a step, deriving its parameters, category, and identity.
    ///
    /// # Examples
    /// ```
    /// use stepsmith::model::{Category, Keyword, Step, StepParameter};
    ///
    /// let step = Step::new(Keyword::When, r#"I send a GET request to "/users/5""#, "api.feature", 4, None);
    /// assert_eq!(step.category(), Category::Api);
    /// assert_eq!(step.parameters(), &[StepParameter::Quoted("/users/5".into())]);
    /// assert_eq!(step.key().normalized(), r#"i send a get request to "{string}""#);
    /// ```
    #[must_use]
    pub fn new(
        keyword: Keyword,
        text: impl Into<String>,
        source_file: impl Into<String>,
        line_number: usize,
        block: Option<BlockArgument>,
    ) -> Self {
        let text = text.into().trim().to_owned();
        let parameters = infer_parameters(&text, block);
        let category = classify(&text);
        let key = StepKey {
            keyword,
            normalized: normalize(&text),
        };
        Self {
            keyword,
            text,
            parameters,
            source_file: source_file.into(),
            line_number,
            block,
            category,
            key,
        }
    }

    /// Step keyword.
    #[must_use]
    pub const fn keyword(&self) -> Keyword {
        self.keyword
    }

    /// Literal step text after the keyword.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Extracted literal values followed by block markers.
    #[must_use]
    pub fn parameters(&self) -> &[StepParameter] {
        &self.parameters
    }

    /// File the step was read from.
    #[must_use]
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    /// One-based line number of the step.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line_number
    }

    /// Block that followed the step line, if any.
    #[must_use]
    pub const fn block(&self) -> Option<BlockArgument> {
        self.block
    }

    /// Category assigned by the classifier.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Identity key.
    #[must_use]
    pub const fn key(&self) -> &StepKey {
        &self.key
    }

    /// Whether the step takes a data table, by mention or by block.
    #[must_use]
    pub fn takes_data_table(&self) -> bool {
        self.parameters.contains(&StepParameter::DataTable)
    }

    /// Whether the step takes a doc string, by mention or by block.
    #[must_use]
    pub fn takes_doc_string(&self) -> bool {
        self.parameters.contains(&StepParameter::DocString)
    }
}

impl PartialEq for Step {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Step {}

impl Hash for Step {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

fn infer_parameters(text: &str, block: Option<BlockArgument>) -> Vec<StepParameter> {
    let tokens = tokenize(text);
    let mut parameters: Vec<StepParameter> = tokens
        .iter()
        .filter_map(|token| match token {
            Token::Quoted(value) => Some(StepParameter::Quoted((*value).to_owned())),
            Token::Integer(value) => Some(StepParameter::Integer((*value).to_owned())),
            Token::Text(_) => None,
        })
        .collect();
    let (mentions_table, mentions_doc) = block_mentions(&tokens);
    if mentions_table || block == Some(BlockArgument::DataTable) {
        parameters.push(StepParameter::DataTable);
    }
    if mentions_doc || block == Some(BlockArgument::DocString) {
        parameters.push(StepParameter::DocString);
    }
    parameters
}
