//! Line scanner turning feature-file text into steps.

use tracing::debug;

use crate::model::{BlockArgument, Keyword, Step};

const SCENARIO_STARTS: [&str; 5] = [
    "Scenario:",
    "Scenario Outline:",
    "Scenario Template:",
    "Example:",
    "Background:",
];
const SCENARIO_ENDS: [&str; 2] = ["Feature:", "Rule:"];
const DOC_FENCES: [&str; 2] = ["\"\"\"", "```"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Outside,
    Scenario,
    Doc(&'static str),
    Table,
}

/// A step line awaiting a possible block argument.
struct Pending<'a> {
    keyword: Keyword,
    text: &'a str,
    line_number: usize,
}

struct Scanner<'a> {
    source: &'a str,
    region: Region,
    pending: Option<Pending<'a>>,
    steps: Vec<Step>,
}

impl<'a> Scanner<'a> {
    const fn new(source: &'a str) -> Self {
        Self {
            source,
            region: Region::Outside,
            pending: None,
            steps: Vec::new(),
        }
    }

    fn flush(&mut self, block: Option<BlockArgument>) {
        if let Some(pending) = self.pending.take() {
            debug!(
                file = self.source,
                line = pending.line_number,
                "parsed step: {} {}",
                pending.keyword,
                pending.text
            );
            self.steps.push(Step::new(
                pending.keyword,
                pending.text,
                self.source,
                pending.line_number,
                block,
            ));
        }
    }

    fn line(&mut self, line_number: usize, raw: &'a str) {
        let line = raw.trim();
        if let Region::Doc(fence) = self.region {
            if line.starts_with(fence) {
                self.region = Region::Scenario;
            }
            return;
        }
        if line.is_empty() || line.starts_with('#') {
            return;
        }
        if SCENARIO_STARTS.iter().any(|start| line.starts_with(start)) {
            self.flush(None);
            self.region = Region::Scenario;
            return;
        }
        if SCENARIO_ENDS.iter().any(|end| line.starts_with(end)) {
            self.flush(None);
            self.region = Region::Outside;
            return;
        }
        if self.region == Region::Outside {
            return;
        }
        if let Some(fence) = DOC_FENCES.into_iter().find(|fence| line.starts_with(fence)) {
            self.flush(Some(BlockArgument::DocString));
            self.region = Region::Doc(fence);
            return;
        }
        if is_table_row(line) {
            self.flush(Some(BlockArgument::DataTable));
            self.region = Region::Table;
            return;
        }
        self.region = Region::Scenario;
        self.flush(None);
        if let Some((keyword, text)) = Keyword::split_line(line) {
            self.pending = Some(Pending {
                keyword,
                text,
                line_number,
            });
        }
    }

    fn finish(mut self) -> Vec<Step> {
        self.flush(None);
        self.steps
    }
}

fn is_table_row(line: &str) -> bool {
    line.len() >= 2 && line.starts_with('|') && line.ends_with('|')
}

/// Extract every step from the text of one feature file.
///
/// `source` names the file in each step's provenance. Lines outside
/// scenario regions and lines inside doc blocks are never steps. A doc
/// block or table directly after a step becomes that step's block argument.
///
/// # Examples
/// ```
/// use stepsmith::extract::extract_source;
/// use stepsmith::model::BlockArgument;
///
/// let text = "Feature: Users\n  Scenario: list\n    Given the users\n      | name |\n    Then I see 2 rows\n";
/// let steps = extract_source("users.feature", text);
/// assert_eq!(steps.len(), 2);
/// assert_eq!(steps[0].block(), Some(BlockArgument::DataTable));
/// assert_eq!(steps[1].line_number(), 5);
/// ```
#[must_use]
pub fn extract_source(source: &str, text: &str) -> Vec<Step> {
    let mut scanner = Scanner::new(source);
    for (index, line) in text.lines().enumerate() {
        scanner.line(index + 1, line);
    }
    scanner.finish()
}
