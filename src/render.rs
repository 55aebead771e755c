//! Java class rendering.
//!
//! One class per category: package declaration, imports, a logger plus the
//! category's automation fields, a constructor, then one annotated method
//! per definition. Rendering is a pure function of its inputs so repeated
//! runs produce byte-identical files.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use minijinja::{Environment, context};
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::config::GenerationConfig;
use crate::model::{Category, GeneratedDefinition};

const TEMPLATE_NAME: &str = "class.java";

const CLASS_TEMPLATE: &str = r#"package {{ package }};

{% for import in imports %}
import {{ import }};
{% endfor %}

public class {{ class_name }} {

    private static final Logger logger = LoggerFactory.getLogger({{ class_name }}.class);
{% for field in fields %}
    {{ field }}
{% endfor %}

    public {{ class_name }}() {
{% for line in constructor %}
        {{ line }}
{% endfor %}
    }
{% for def in definitions %}

    @{{ def.keyword }}("{{ def.pattern }}")
    public void {{ def.name }}({{ def.signature }}) {
{{ def.body }}
    }
{% endfor %}
}
"#;

const COMMON_IMPORTS: [&str; 5] = [
    "io.cucumber.java.en.*",
    "io.cucumber.datatable.DataTable",
    "org.testng.Assert",
    "org.slf4j.Logger",
    "org.slf4j.LoggerFactory",
];

/// Errors raised while rendering a class.
#[derive(Debug, Error, Diagnostic)]
pub enum RenderError {
    /// The class template failed to compile or render.
    #[error("failed to render {class}")]
    #[diagnostic(code(stepsmith::render::template))]
    Template {
        /// Class being rendered.
        class: String,
        /// Template engine error.
        #[source]
        source: minijinja::Error,
    },
}

#[derive(Serialize)]
struct MethodView<'a> {
    keyword: &'a str,
    pattern: String,
    name: &'a str,
    signature: String,
    body: String,
}

/// Escape text for use inside a Java string literal.
///
/// # Examples
/// ```
/// use stepsmith::render::java_escape;
///
/// assert_eq!(java_escape(r#"say "hi" \ bye"#), r#"say \"hi\" \\ bye"#);
/// ```
#[must_use]
pub fn java_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

fn indent(body: &str, prefix: &str) -> String {
    itertools::join(
        body.lines().map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        }),
        "\n",
    )
}

fn category_imports(category: Category) -> &'static [&'static str] {
    match category {
        Category::Web => &[
            "org.openqa.selenium.WebDriver",
            "org.openqa.selenium.WebElement",
            "org.openqa.selenium.By",
            "org.openqa.selenium.support.ui.WebDriverWait",
            "org.openqa.selenium.support.ui.ExpectedConditions",
        ],
        Category::Api => &[
            "io.restassured.RestAssured",
            "io.restassured.response.Response",
            "io.restassured.specification.RequestSpecification",
        ],
        Category::Mobile => &[
            "io.appium.java_client.AppiumDriver",
            "io.appium.java_client.MobileElement",
        ],
        Category::Common => &[],
    }
}

fn category_fields(category: Category) -> &'static [&'static str] {
    match category {
        Category::Web => &["private WebDriver driver;", "private WebDriverWait wait;"],
        Category::Api => &[
            "private RequestSpecification request;",
            "private Response response;",
        ],
        Category::Mobile => &["private AppiumDriver<MobileElement> driver;"],
        Category::Common => &[],
    }
}

fn constructor_lines(category: Category) -> &'static [&'static str] {
    match category {
        Category::Web => &[
            "// Initialize WebDriver",
            "// this.driver = DriverManager.getDriver();",
            "// this.wait = new WebDriverWait(driver, 10);",
        ],
        Category::Api => &[
            "// Initialize REST Assured",
            "// this.request = RestAssured.given();",
        ],
        Category::Mobile => &[
            "// Initialize Appium Driver",
            "// this.driver = MobileDriverManager.getDriver();",
        ],
        Category::Common => &["// Initialize common dependencies"],
    }
}

/// Render the Java source of the `category` class.
///
/// # Errors
/// Returns [`RenderError::Template`] if the template engine fails.
pub fn render_class(
    config: &GenerationConfig,
    category: Category,
    definitions: &[GeneratedDefinition],
) -> Result<String, RenderError> {
    let class_name = category.class_name();
    let template_err = |source| RenderError::Template {
        class: class_name.clone(),
        source,
    };

    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_template(TEMPLATE_NAME, CLASS_TEMPLATE)
        .map_err(template_err)?;
    let template = env.get_template(TEMPLATE_NAME).map_err(template_err)?;

    let imports: Vec<&str> = COMMON_IMPORTS
        .iter()
        .chain(category_imports(category))
        .copied()
        .collect();
    let methods: Vec<MethodView<'_>> = definitions
        .iter()
        .map(|def| MethodView {
            keyword: def.keyword().as_str(),
            pattern: java_escape(def.match_pattern()),
            name: def.method_name(),
            signature: def.signature().to_string(),
            body: indent(def.body(), "        "),
        })
        .collect();

    template
        .render(context! {
            package => config.package_for(category),
            imports => imports,
            class_name => &class_name,
            fields => category_fields(category),
            constructor => constructor_lines(category),
            definitions => methods,
        })
        .map_err(template_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Keyword, Step};
    use crate::synth::{Synthesizer, TemplateSet, UsedNames};
    use rstest::rstest;

    #[rstest]
    fn renders_common_class() -> anyhow::Result<()> {
        let config = GenerationConfig::default();
        let mut templates = TemplateSet::empty();
        templates.insert(Category::Common, "{loggerStatement}\n\nthrow new PendingException();");
        let synth = Synthesizer::new(&config, templates);
        let step = Step::new(Keyword::Given, r#"I wait for "dialog""#, "f.feature", 1, None);
        let (def, _) = synth.synthesize_step(Category::Common, &step, &mut UsedNames::new())?;

        let source = render_class(&config, Category::Common, &[def])?;
        assert_eq!(
            source,
            concat!(
                "package com.testautomation.stepdefinitions.common;\n",
                "\n",
                "import io.cucumber.java.en.*;\n",
                "import io.cucumber.datatable.DataTable;\n",
                "import org.testng.Assert;\n",
                "import org.slf4j.Logger;\n",
                "import org.slf4j.LoggerFactory;\n",
                "\n",
                "public class COMMONStepDefinitions {\n",
                "\n",
                "    private static final Logger logger = LoggerFactory.getLogger(COMMONStepDefinitions.class);\n",
                "\n",
                "    public COMMONStepDefinitions() {\n",
                "        // Initialize common dependencies\n",
                "    }\n",
                "\n",
                "    @Given(\"^I wait for \\\"([^\\\"]+)\\\"$\")\n",
                "    public void iWaitFor(String param1) {\n",
                "        logger.info(\"Executing common step: {}\", \"I wait for \\\"dialog\\\"\");\n",
                "\n",
                "        throw new PendingException();\n",
                "    }\n",
                "}\n",
            )
        );
        Ok(())
    }

    #[rstest]
    fn web_class_carries_selenium_members() -> anyhow::Result<()> {
        let config = GenerationConfig::default();
        let source = render_class(&config, Category::Web, &[])?;
        assert!(source.contains("import org.openqa.selenium.WebDriver;\n"));
        assert!(source.contains("    private WebDriverWait wait;\n"));
        assert!(source.contains("    public WEBStepDefinitions() {\n"));
        Ok(())
    }

    #[rstest]
    fn pattern_backslashes_are_doubled() {
        assert_eq!(java_escape(r"^wait (\d+)$"), r"^wait (\\d+)$");
    }
}
