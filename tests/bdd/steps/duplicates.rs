//! Step definitions for duplicate detection scenarios.

use crate::bdd::fixtures::{RefCellOptionExt, TestWorld, strip_quotes};
use anyhow::{Context, Result, ensure};
use rstest_bdd_macros::{then, when};
use stepsmith::extract::extract_directory;
use stepsmith::organize::{find_duplicates, organization_report, organize_steps};
use test_support::FeatureTree;

#[when("the duplicate report is built")]
fn build_report(world: &TestWorld) -> Result<()> {
    let features = world
        .tree
        .with_ref(FeatureTree::features)
        .context("feature tree missing")?;
    let extraction = extract_directory(&features)?;
    let duplicates = find_duplicates(&extraction.steps_by_file);
    let buckets = organize_steps(&extraction.steps_by_file, &duplicates);
    world.report.set(organization_report(&duplicates, &buckets));
    Ok(())
}

#[then("the duplicate report mentions {fragment:string}")]
fn report_mentions(world: &TestWorld, fragment: &str) -> Result<()> {
    let report = world.report.get().context("report has not been built")?;
    let fragment = strip_quotes(fragment);
    ensure!(report.contains(fragment), "report lacks '{fragment}':\n{report}");
    Ok(())
}

#[then("{count:usize} steps are shared between files")]
fn shared_count(world: &TestWorld, count: usize) -> Result<()> {
    let actual = world
        .output
        .with_ref(|output| output.duplicates.len())
        .context("generation has not run")?;
    ensure!(actual == count, "expected {count} shared steps, got {actual}");
    Ok(())
}
