//! End-to-end tests for the in-memory generation pipeline.

#![allow(clippy::expect_used, reason = "pipeline tests use expect in fixtures")]

use anyhow::{Context, Result, ensure};
use rstest::{fixture, rstest};
use stepsmith::config::GenerationConfig;
use stepsmith::diagnostics::Issue;
use stepsmith::model::{Category, GeneratedDefinition};
use stepsmith::runner::{Pipeline, PipelineOutput};
use test_support::{FeatureTree, sample_features};

fn config_for(tree: &FeatureTree) -> GenerationConfig {
    GenerationConfig {
        output_directory: tree.output(),
        ..GenerationConfig::default()
    }
}

fn methods(output: &PipelineOutput, category: Category) -> Vec<&str> {
    output
        .definitions
        .get(&category)
        .map(|defs| defs.iter().map(GeneratedDefinition::method_name).collect())
        .unwrap_or_default()
}

#[fixture]
fn sample() -> FeatureTree {
    FeatureTree::copied_from(&sample_features()).expect("copy sample features")
}

#[rstest]
fn sample_tree_is_bucketed_by_category(sample: FeatureTree) -> Result<()> {
    let output = Pipeline::run(&sample.features(), &config_for(&sample))?;
    let files: Vec<&str> = output.steps_by_file.keys().map(String::as_str).collect();
    ensure!(
        files == ["checkout.feature", "login.feature", "mobile/app.feature"],
        "unexpected file order {files:?}"
    );
    ensure!(output.duplicates.len() == 2, "two shared steps expected");
    ensure!(
        methods(&output, Category::Common) == ["iAmLoggedInAs", "theReceiptReads", "iWaitSeconds"],
        "COMMON methods: {:?}",
        methods(&output, Category::Common)
    );
    ensure!(
        methods(&output, Category::Web) == ["iNavigateToTheDashboardPage", "iClickTheButton"],
        "WEB methods: {:?}",
        methods(&output, Category::Web)
    );
    ensure!(
        methods(&output, Category::Mobile) == ["iLaunchTheMobileApp", "theDeviceIsRotatedTimes"],
        "MOBILE methods: {:?}",
        methods(&output, Category::Mobile)
    );
    ensure!(output.renames.is_empty(), "no collisions expected");
    ensure!(output.issues.is_empty(), "no issues expected: {:?}", output.issues);
    Ok(())
}

#[rstest]
fn block_arguments_extend_the_signature(sample: FeatureTree) -> Result<()> {
    let output = Pipeline::run(&sample.features(), &config_for(&sample))?;
    let api = output
        .definitions
        .get(&Category::Api)
        .context("API definitions")?;
    let post = api.first().context("POST step")?;
    ensure!(post.signature().to_string() == "String param1, DataTable dataTable");
    let common = output
        .definitions
        .get(&Category::Common)
        .context("COMMON definitions")?;
    let receipt = common
        .iter()
        .find(|def| def.method_name() == "theReceiptReads")
        .context("receipt step")?;
    ensure!(receipt.signature().to_string() == "String docString");
    Ok(())
}

#[rstest]
fn api_step_gets_a_string_capture() -> Result<()> {
    let tree = FeatureTree::new()?;
    tree.write_feature(
        "users.feature",
        "Feature: Users\n  Scenario: fetch\n    When I send a GET request to \"/users/5\"\n",
    )?;
    let output = Pipeline::run(&tree.features(), &config_for(&tree))?;
    let api = output
        .definitions
        .get(&Category::Api)
        .context("API definitions")?;
    let [definition] = api.as_slice() else {
        anyhow::bail!("expected exactly one API definition, got {}", api.len());
    };
    ensure!(definition.match_pattern() == r#"^I send a GET request to "([^"]+)"$"#);
    ensure!(definition.signature().to_string() == "String param1");
    let step = output
        .buckets
        .get(&Category::Api)
        .and_then(|steps| steps.first())
        .context("API step")?;
    ensure!(step.key().normalized() == r#"i send a get request to "{string}""#);
    Ok(())
}

#[rstest]
fn colliding_names_are_suffixed() -> Result<()> {
    let tree = FeatureTree::new()?;
    tree.write_feature(
        "buttons.feature",
        "Feature: Buttons\n  Scenario: press\n    When click button\n    When click 2 button\n",
    )?;
    let output = Pipeline::run(&tree.features(), &config_for(&tree))?;
    ensure!(
        methods(&output, Category::Web) == ["clickButton", "clickButton1"],
        "WEB methods: {:?}",
        methods(&output, Category::Web)
    );
    ensure!(output.renames.len() == 1);
    Ok(())
}

#[rstest]
fn one_text_under_two_keywords_keeps_its_name() -> Result<()> {
    let tree = FeatureTree::new()?;
    tree.write_feature(
        "wait.feature",
        "Feature: Waiting\n  Scenario: pause\n    Given I wait\n    Then I wait\n",
    )?;
    let output = Pipeline::run(&tree.features(), &config_for(&tree))?;
    ensure!(
        methods(&output, Category::Common) == ["iWait"],
        "COMMON methods: {:?}",
        methods(&output, Category::Common)
    );
    ensure!(output.renames.is_empty(), "unexpected renames {:?}", output.renames);
    let common = output
        .classes
        .iter()
        .find(|class| class.category == Category::Common)
        .context("COMMON class")?;
    ensure!(common.source.as_str().matches("public void iWait(").count() == 1);
    Ok(())
}

#[rstest]
fn unreadable_feature_file_is_reported_not_fatal() -> Result<()> {
    let tree = FeatureTree::new()?;
    tree.write_feature(
        "ok.feature",
        "Feature: Ok\n  Scenario: ready\n    Given I am ready\n",
    )?;
    std::fs::write(tree.features().join("bad.feature"), [0xff, 0xfe, 0x00])
        .context("write bad.feature")?;
    let output = Pipeline::run(&tree.features(), &config_for(&tree))?;
    let files: Vec<&str> = output.steps_by_file.keys().map(String::as_str).collect();
    ensure!(files == ["ok.feature"], "unexpected files {files:?}");
    ensure!(methods(&output, Category::Common) == ["iAmReady"]);
    let skipped: Vec<&str> = output
        .issues
        .iter()
        .filter_map(|issue| match issue {
            Issue::FileSkipped { path, .. } => Some(path.as_str()),
            _ => None,
        })
        .collect();
    ensure!(skipped == ["bad.feature"], "skipped files {skipped:?}");
    ensure!(output.report().total_steps == 1);
    Ok(())
}

#[rstest]
fn empty_directory_yields_empty_results() -> Result<()> {
    let tree = FeatureTree::new()?;
    let output = Pipeline::run(&tree.features(), &config_for(&tree))?;
    ensure!(output.steps_by_file.is_empty());
    ensure!(output.duplicates.is_empty());
    ensure!(output.buckets.is_empty());
    ensure!(output.classes.is_empty());
    ensure!(output.report().total_steps == 0);
    Ok(())
}

#[rstest]
fn repeated_runs_render_identical_classes(sample: FeatureTree) -> Result<()> {
    let config = config_for(&sample);
    let first = Pipeline::run(&sample.features(), &config)?;
    let second = Pipeline::run(&sample.features(), &config)?;
    let sources = |output: &PipelineOutput| -> Vec<String> {
        output
            .classes
            .iter()
            .map(|class| class.source.as_str().to_owned())
            .collect()
    };
    ensure!(sources(&first) == sources(&second));
    let digests = |output: &PipelineOutput| -> Vec<String> {
        output
            .report()
            .classes
            .into_iter()
            .map(|class| class.digest)
            .collect()
    };
    ensure!(digests(&first) == digests(&second));
    Ok(())
}
