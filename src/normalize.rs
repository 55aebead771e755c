//! Canonical step text used for identity.

use crate::tokens::{BlockPhrase, Token, rewrite_block_phrases, tokenize};

/// Normalise step text so steps differing only in literal values match.
///
/// Quoted literals become `"{string}"`, bare integers `{int}`, and the block
/// phrases `{datatable}` or `{docstring}`. Plain text is lower-cased and the
/// result trimmed.
///
/// # Examples
/// ```
/// use stepsmith::normalize::normalize;
///
/// assert_eq!(
///     normalize(r#"I send a GET request to "/users/5""#),
///     r#"i send a get request to "{string}""#
/// );
/// assert_eq!(normalize("I wait 10 seconds"), "i wait {int} seconds");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for token in tokenize(text) {
        match token {
            Token::Text(plain) => {
                let rewritten = rewrite_block_phrases(plain, |phrase| match phrase {
                    BlockPhrase::DataTable => "{datatable}",
                    BlockPhrase::DocString => "{docstring}",
                });
                out.push_str(&rewritten.to_lowercase());
            }
            Token::Quoted(_) => out.push_str("\"{string}\""),
            Token::Integer(_) => out.push_str("{int}"),
        }
    }
    out.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("the following data table", "the following {datatable}")]
    #[case("a Doc String body", "a {docstring} body")]
    #[case("a MULTILINE body", "a {docstring} body")]
    #[case(r#"I enter "a" and "b""#, r#"i enter "{string}" and "{string}""#)]
    #[case("item v2 costs 30", "item v2 costs {int}")]
    #[case("  padded  ", "padded")]
    #[case(r#"an "" empty literal"#, r#"an "" empty literal"#)]
    fn normalizes_literals_and_phrases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[rstest]
    fn normalization_is_idempotent_on_plain_text() {
        let once = normalize("I open the Home page");
        assert_eq!(normalize(&once), once);
    }
}
