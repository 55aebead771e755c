//! Keyword-based step classification.

use crate::model::Category;

/// Keyword groups checked in precedence order; the first match wins.
const RULES: [(Category, &[&str]); 3] = [
    (Category::Api, &["api", "request", "response"]),
    (Category::Mobile, &["mobile", "app", "device"]),
    (
        Category::Web,
        &["page", "element", "click", "input", "verify", "navigate"],
    ),
];

/// Assign a category to step text by case-insensitive substring match.
///
/// Steps matching no rule are [`Category::Common`].
///
/// # Examples
/// ```
/// use stepsmith::classify::classify;
/// use stepsmith::model::Category;
///
/// assert_eq!(classify("I open the login page"), Category::Web);
/// assert_eq!(classify("the API page responds"), Category::Api);
/// assert_eq!(classify("I wait"), Category::Common);
/// ```
#[must_use]
pub fn classify(text: &str) -> Category {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .find(|(_, words)| words.iter().any(|word| lower.contains(word)))
        .map_or(Category::Common, |(category, _)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"I send a GET request to "/users/5""#, Category::Api)]
    #[case("the response status is 200", Category::Api)]
    #[case("I launch the mobile app", Category::Mobile)]
    #[case("the device is rotated", Category::Mobile)]
    #[case("I click the submit button", Category::Web)]
    #[case("I verify the title", Category::Web)]
    #[case("I navigate home", Category::Web)]
    #[case("the user is logged in", Category::Common)]
    #[case("", Category::Common)]
    fn classifies_by_keyword(#[case] text: &str, #[case] expected: Category) {
        assert_eq!(classify(text), expected);
    }

    #[rstest]
    #[case("the API page loads", Category::Api)]
    #[case("the app page loads", Category::Mobile)]
    #[case("the request from the mobile device", Category::Api)]
    fn earlier_rules_win(#[case] text: &str, #[case] expected: Category) {
        assert_eq!(classify(text), expected);
    }

    #[rstest]
    fn substring_matching_is_not_word_bounded() {
        // "happy" contains "app".
        assert_eq!(classify("a happy path"), Category::Mobile);
    }
}
