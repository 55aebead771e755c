//! Plain-text organisation reports.
//!
//! Both reports are [`Display`] wrappers so they can be written straight to
//! a terminal or collected into a `String`.

use std::fmt::{self, Display, Formatter};

use indexmap::IndexMap;

use super::{Buckets, Duplicates};
use crate::model::Category;

struct OrganizationReport<'a> {
    duplicates: &'a Duplicates,
    buckets: &'a Buckets,
}

impl Display for OrganizationReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== STEP ORGANIZATION REPORT ===\n")?;
        writeln!(f, "DUPLICATE STEPS FOUND:")?;
        if self.duplicates.is_empty() {
            writeln!(f, "No duplicate steps found.\n")?;
        }
        for (step, files) in self.duplicates {
            writeln!(f, "- Step: {} {}", step.keyword(), step.text())?;
            writeln!(f, "  Found in files: {}", files.join(", "))?;
            writeln!(f, "  Step type: {}\n", step.category())?;
        }
        writeln!(f, "STEP ORGANIZATION SUMMARY:")?;
        for (category, steps) in self.buckets {
            writeln!(f, "- {category} steps: {}", steps.len())?;
        }
        Ok(())
    }
}

struct Suggestions<'a> {
    duplicates: &'a Duplicates,
}

impl Display for Suggestions<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== ORGANIZATION SUGGESTIONS ===\n")?;
        if self.duplicates.is_empty() {
            return writeln!(f, "No duplicates found. Current organization is optimal.");
        }
        let mut by_category: IndexMap<Category, usize> = IndexMap::new();
        for step in self.duplicates.keys() {
            *by_category.entry(step.category()).or_default() += 1;
        }
        by_category.sort_keys();

        writeln!(f, "RECOMMENDED ACTIONS:\n")?;
        for (index, (category, count)) in by_category.iter().enumerate() {
            writeln!(f, "{}. {category} Steps ({count} duplicates):", index + 1)?;
            writeln!(f, "   - Move to common step definition file")?;
            writeln!(f, "   - Ensure consistent parameter handling")?;
            writeln!(f, "   - Consider creating reusable helper methods\n")?;
        }
        f.write_str(concat!(
            "GENERAL RECOMMENDATIONS:\n",
            "- Use Page Object Model for web steps\n",
            "- Create API client classes for API steps\n",
            "- Implement mobile page objects for mobile steps\n",
            "- Use dependency injection for shared resources\n",
        ))
    }
}

/// Render duplicates and per-category counts.
#[must_use]
pub fn organization_report(duplicates: &Duplicates, buckets: &Buckets) -> String {
    OrganizationReport {
        duplicates,
        buckets,
    }
    .to_string()
}

/// Suggest how to consolidate the detected duplicates.
#[must_use]
pub fn organization_suggestions(duplicates: &Duplicates) -> String {
    Suggestions { duplicates }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Keyword, Step};
    use rstest::rstest;

    fn duplicates() -> Duplicates {
        let mut map = Duplicates::new();
        map.insert(
            Step::new(Keyword::Given, "I open the login page", "a.feature", 2, None),
            vec!["a.feature".into(), "b.feature".into()],
        );
        map
    }

    #[rstest]
    fn report_lists_duplicates_and_counts() {
        let dups = duplicates();
        let mut buckets = Buckets::new();
        buckets.insert(Category::Common, dups.keys().cloned().collect());
        let report = organization_report(&dups, &buckets);
        assert_eq!(
            report,
            concat!(
                "=== STEP ORGANIZATION REPORT ===\n\n",
                "DUPLICATE STEPS FOUND:\n",
                "- Step: Given I open the login page\n",
                "  Found in files: a.feature, b.feature\n",
                "  Step type: WEB\n\n",
                "STEP ORGANIZATION SUMMARY:\n",
                "- COMMON steps: 1\n",
            )
        );
    }

    #[rstest]
    fn report_without_duplicates() {
        let report = organization_report(&Duplicates::new(), &Buckets::new());
        assert!(report.contains("No duplicate steps found."));
    }

    #[rstest]
    fn suggestions_group_by_category() {
        let text = organization_suggestions(&duplicates());
        assert!(text.contains("1. WEB Steps (1 duplicates):"));
        assert!(text.ends_with("- Use dependency injection for shared resources\n"));
    }

    #[rstest]
    fn suggestions_without_duplicates() {
        assert_eq!(
            organization_suggestions(&Duplicates::new()),
            "=== ORGANIZATION SUGGESTIONS ===\n\nNo duplicates found. Current organization is optimal.\n"
        );
    }
}
