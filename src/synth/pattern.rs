//! Match-pattern construction.
//!
//! The pattern and its capture list are built in one pass over the token
//! stream, so the signature derived from [`MatchPattern::captures`] always
//! lines up with the capture groups in [`MatchPattern::pattern`].

use regex::Regex;

use super::SynthesisError;
use crate::tokens::{BlockPhrase, Token, rewrite_block_phrases, tokenize};

const QUOTED_GROUP: &str = "\"([^\"]+)\"";
const INTEGER_GROUP: &str = r"(\d+)";
const REGEX_SPECIAL: &[char] = &[
    '\\', '[', ']', '(', ')', '{', '}', '.', '*', '+', '?', '^', '$', '|',
];

/// Kind of value bound by one capture group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// `"([^"]+)"`, bound to a `String`.
    Text,
    /// `(\d+)`, bound to an `int`.
    Int,
}

/// Anchored regular expression plus its capture kinds in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPattern {
    pattern: String,
    captures: Vec<Capture>,
}

impl MatchPattern {
    /// Pattern source, anchored with `^` and `$`.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Consume the pattern, returning its source.
    #[must_use]
    pub fn into_pattern(self) -> String {
        self.pattern
    }

    /// Capture kinds, left to right.
    #[must_use]
    pub fn captures(&self) -> &[Capture] {
        &self.captures
    }

    #[cfg(test)]
    pub(crate) fn from_parts(pattern: &str, captures: Vec<Capture>) -> Self {
        Self {
            pattern: pattern.to_owned(),
            captures,
        }
    }

    /// Compile the pattern and check it has `expected` capture groups.
    ///
    /// # Errors
    /// [`SynthesisError::InvalidPattern`] when the pattern does not compile,
    /// [`SynthesisError::ArityMismatch`] when the group count differs.
    pub fn verify(&self, expected: usize) -> Result<(), SynthesisError> {
        let regex = Regex::new(&self.pattern).map_err(|e| SynthesisError::InvalidPattern {
            pattern: self.pattern.clone(),
            message: e.to_string(),
        })?;
        let groups = regex.captures_len().saturating_sub(1);
        if groups == expected {
            Ok(())
        } else {
            Err(SynthesisError::ArityMismatch {
                pattern: self.pattern.clone(),
                groups,
                parameters: expected,
            })
        }
    }
}

fn push_escaped(out: &mut String, literal: &str) {
    for ch in literal.chars() {
        if REGEX_SPECIAL.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
}

/// Build the match pattern for literal step text.
///
/// # Examples
/// ```
/// use stepsmith::synth::{Capture, build_pattern};
///
/// let built = build_pattern(r#"I add 2 items to "cart" (fast)"#);
/// assert_eq!(built.pattern(), r#"^I add (\d+) items to "([^"]+)" \(fast\)$"#);
/// assert_eq!(built.captures(), &[Capture::Int, Capture::Text]);
/// ```
#[must_use]
pub fn build_pattern(text: &str) -> MatchPattern {
    let mut pattern = String::from("^");
    let mut captures = Vec::new();
    for token in tokenize(text) {
        match token {
            Token::Text(plain) => {
                let rewritten = rewrite_block_phrases(plain, |phrase| match phrase {
                    BlockPhrase::DataTable => "datatable",
                    BlockPhrase::DocString => "docstring",
                });
                push_escaped(&mut pattern, &rewritten);
            }
            Token::Quoted(_) => {
                pattern.push_str(QUOTED_GROUP);
                captures.push(Capture::Text);
            }
            Token::Integer(_) => {
                pattern.push_str(INTEGER_GROUP);
                captures.push(Capture::Int);
            }
        }
    }
    pattern.push('$');
    MatchPattern { pattern, captures }
}
