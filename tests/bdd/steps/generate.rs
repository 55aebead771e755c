//! Step definitions for step-definition generation scenarios.

use crate::bdd::fixtures::{RefCellOptionExt, TestWorld, strip_quotes};
use anyhow::{Context, Result, ensure};
use rstest_bdd_macros::{given, then, when};
use stepsmith::model::Category;
use stepsmith::runner::Pipeline;
use test_support::{FeatureTree, sample_features};

fn parse_category(name: &str) -> Result<Category> {
    let name = strip_quotes(name);
    Category::ALL
        .into_iter()
        .find(|category| category.as_str() == name)
        .with_context(|| format!("unknown category {name}"))
}

fn install_tree(world: &TestWorld, tree: FeatureTree) {
    world.config.borrow_mut().output_directory = tree.output();
    world.tree.set_value(tree);
}

fn methods_of(world: &TestWorld, category: Category) -> Result<Vec<String>> {
    world
        .output
        .with_ref(|output| {
            output
                .definitions
                .get(&category)
                .map(|defs| defs.iter().map(|def| def.method_name().to_owned()).collect())
                .unwrap_or_default()
        })
        .context("generation has not run")
}

#[given("the sample feature tree")]
fn sample_tree(world: &TestWorld) -> Result<()> {
    install_tree(world, FeatureTree::copied_from(&sample_features())?);
    Ok(())
}

#[given("an empty feature tree")]
fn empty_tree(world: &TestWorld) -> Result<()> {
    install_tree(world, FeatureTree::new()?);
    Ok(())
}

#[given("a feature file {name:string} containing the step {step:string}")]
fn feature_with_step(world: &TestWorld, name: &str, step: &str) -> Result<()> {
    if world.tree.borrow().is_none() {
        install_tree(world, FeatureTree::new()?);
    }
    let contents = format!(
        "Feature: {name}\n  Scenario: generated\n    {step}\n",
        name = strip_quotes(name),
        step = strip_quotes(step)
    );
    world
        .tree
        .with_ref(|tree| tree.write_feature(strip_quotes(name), &contents))
        .context("feature tree missing")??;
    Ok(())
}

#[given("the {category:string} class is disabled")]
fn disable_category(world: &TestWorld, category: &str) -> Result<()> {
    let mut config = world.config.borrow_mut();
    match parse_category(category)? {
        Category::Api => config.generate_api = false,
        Category::Mobile => config.generate_mobile = false,
        Category::Web => config.generate_web = false,
        Category::Common => config.generate_common = false,
    }
    Ok(())
}

#[given("a template directory that does not exist")]
fn missing_template_dir(world: &TestWorld) -> Result<()> {
    let root = world
        .tree
        .with_ref(|tree| tree.root().join("no-templates"))
        .context("feature tree missing")?;
    world.config.borrow_mut().template_directory = Some(root);
    Ok(())
}

#[when("step definitions are generated")]
fn generate(world: &TestWorld) -> Result<()> {
    let features = world
        .tree
        .with_ref(FeatureTree::features)
        .context("feature tree missing")?;
    let config = world.config.borrow().clone();
    match Pipeline::run(&features, &config) {
        Ok(output) => world.output.set_value(output),
        Err(err) => world.error.set(err.to_string()),
    }
    Ok(())
}

#[when("step definitions are generated from a missing directory")]
fn generate_missing(world: &TestWorld) -> Result<()> {
    let tree = FeatureTree::new()?;
    let config = world.config.borrow().clone();
    match Pipeline::run(&tree.root().join("absent"), &config) {
        Ok(output) => world.output.set_value(output),
        Err(err) => world.error.set(err.to_string()),
    }
    Ok(())
}

#[then("the {category:string} class declares method {method:string}")]
fn class_declares(world: &TestWorld, category: &str, method: &str) -> Result<()> {
    let methods = methods_of(world, parse_category(category)?)?;
    let method = strip_quotes(method);
    ensure!(
        methods.iter().any(|name| name == method),
        "{method} not among {methods:?}"
    );
    Ok(())
}

#[then("no {category:string} class is generated")]
fn class_absent(world: &TestWorld, category: &str) -> Result<()> {
    let category = parse_category(category)?;
    let present = world
        .output
        .with_ref(|output| output.classes.iter().any(|class| class.category == category))
        .context("generation has not run")?;
    ensure!(!present, "{category} class was generated");
    Ok(())
}

#[then("{count:usize} classes are generated")]
fn class_count(world: &TestWorld, count: usize) -> Result<()> {
    let actual = world
        .output
        .with_ref(|output| output.classes.len())
        .context("generation has not run")?;
    ensure!(actual == count, "expected {count} classes, got {actual}");
    Ok(())
}

#[then("the template directory is reported missing")]
fn template_dir_issue(world: &TestWorld) -> Result<()> {
    let reported = world
        .output
        .with_ref(|output| {
            output.issues.iter().any(|issue| {
                matches!(issue, stepsmith::diagnostics::Issue::TemplateDirMissing { .. })
            })
        })
        .context("generation has not run")?;
    ensure!(reported, "no template directory issue recorded");
    Ok(())
}

#[then("generation fails with {fragment:string}")]
fn generation_fails(world: &TestWorld, fragment: &str) -> Result<()> {
    let error = world.error.get().context("generation did not fail")?;
    let fragment = strip_quotes(fragment);
    ensure!(error.contains(fragment), "error '{error}' lacks '{fragment}'");
    Ok(())
}
