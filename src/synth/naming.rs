//! Method-name synthesis.

use std::collections::HashSet;

use tracing::debug;

use crate::config::NamingConvention;
use crate::tokens::{Token, tokenize};

const FALLBACK_NAME: &str = "step";

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + chars.as_str()
    })
}

/// Derive the base method name for step text.
///
/// Quoted literals and digits are removed, as is anything other than ASCII
/// letters and whitespace. The remaining words are lower-cased and joined per
/// `convention`. Text with no usable words yields `step`.
///
/// # Examples
/// ```
/// use stepsmith::config::NamingConvention;
/// use stepsmith::synth::base_method_name;
///
/// let text = r#"I click the "Submit" button 2 times"#;
/// assert_eq!(base_method_name(text, NamingConvention::CamelCase), "iClickTheButtonTimes");
/// assert_eq!(base_method_name(text, NamingConvention::SnakeCase), "i_click_the_button_times");
/// assert_eq!(base_method_name(r#""42""#, NamingConvention::CamelCase), "step");
/// ```
#[must_use]
pub fn base_method_name(text: &str, convention: NamingConvention) -> String {
    let cleaned: String = tokenize(text)
        .into_iter()
        .map(|token| match token {
            Token::Text(plain) => plain,
            Token::Quoted(_) | Token::Integer(_) => " ",
        })
        .flat_map(str::chars)
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.is_empty() {
        return FALLBACK_NAME.to_owned();
    }
    match convention {
        NamingConvention::CamelCase => words
            .iter()
            .enumerate()
            .map(|(index, word)| {
                if index == 0 {
                    (*word).to_owned()
                } else {
                    capitalize(word)
                }
            })
            .collect(),
        NamingConvention::PascalCase => words.iter().map(|word| capitalize(word)).collect(),
        NamingConvention::SnakeCase => words.join("_"),
        NamingConvention::KebabCase => words.join("-"),
    }
}

/// Method names already claimed within one class.
#[derive(Debug, Default)]
pub struct UsedNames {
    taken: HashSet<String>,
}

impl UsedNames {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `base`, or `base` with the smallest free suffix from 1 upward.
    ///
    /// # Examples
    /// ```
    /// use stepsmith::synth::UsedNames;
    ///
    /// let mut names = UsedNames::new();
    /// assert_eq!(names.claim("clickButton"), "clickButton");
    /// assert_eq!(names.claim("clickButton"), "clickButton1");
    /// assert_eq!(names.claim("clickButton"), "clickButton2");
    /// ```
    pub fn claim(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_owned()) {
            return base.to_owned();
        }
        let name = (1_usize..)
            .map(|suffix| format!("{base}{suffix}"))
            .find(|candidate| !self.taken.contains(candidate))
            .unwrap_or_else(|| base.to_owned());
        debug!(base, name = %name, "method name taken; using suffix");
        self.taken.insert(name.clone());
        name
    }

    /// Whether `name` is already claimed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.taken.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NamingConvention::CamelCase, "iClickTheButton")]
    #[case(NamingConvention::PascalCase, "IClickTheButton")]
    #[case(NamingConvention::SnakeCase, "i_click_the_button")]
    #[case(NamingConvention::KebabCase, "i-click-the-button")]
    fn joins_words_per_convention(#[case] convention: NamingConvention, #[case] expected: &str) {
        assert_eq!(base_method_name("I click the button", convention), expected);
    }

    #[rstest]
    #[case("the user's cart is empty!", "theUsersCartIsEmpty")]
    #[case("I open v2 of the app", "iOpenVOfTheApp")]
    #[case(r#"I type "x"twice"#, "iTypeTwice")]
    #[case("   ", "step")]
    #[case("über", "ber")]
    fn cleans_step_text(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(base_method_name(text, NamingConvention::CamelCase), expected);
    }

    #[rstest]
    fn suffixes_skip_names_already_taken() {
        let mut names = UsedNames::new();
        assert_eq!(names.claim("open1"), "open1");
        assert_eq!(names.claim("open"), "open");
        assert_eq!(names.claim("open"), "open2");
        assert!(names.contains("open2"));
    }
}
