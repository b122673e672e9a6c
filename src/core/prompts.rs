//! Prompts sent to the generative backend
//!
//! The system prompt fixes the output format; the user prompt carries the
//! method and scenario for a single test.

use crate::models::{ScenarioDescriptor, ScenarioKind};

/// System prompt for single-test generation
pub const SYSTEM_PROMPT_TEST: &str = r#"You are a test generation agent writing JUnit 5 tests for Java code.
Output exactly ONE test method, annotated with @Test, and nothing else.
Do not output a class declaration, imports, or explanations.
Use JUnit 5 assertions: assertEquals(), assertThrows(), assertTrue(), assertDoesNotThrow().
Structure the body with // Arrange, // Act and // Assert comments."#;

/// Assemble the user prompt for one scenario
pub fn assemble_scenario_prompt(class_name: &str, scenario: &ScenarioDescriptor<'_>) -> String {
    let method = scenario.method;
    let mut prompt = String::new();

    prompt.push_str("[CLASS UNDER TEST]\n");
    prompt.push_str(class_name);
    prompt.push_str("\n\n");

    prompt.push_str("[METHOD]\n");
    prompt.push_str(&method.signature);
    prompt.push('\n');
    if method.is_static {
        prompt.push_str(&format!("Call it statically: {}.{}(...)\n", class_name, method.name));
    } else {
        let instance = instance_name(class_name);
        prompt.push_str(&format!(
            "Create the instance inside the test: {} {} = new {}();\n",
            class_name, instance, class_name
        ));
    }
    prompt.push('\n');

    prompt.push_str("[SCENARIO]\n");
    match &scenario.kind {
        ScenarioKind::HappyPath => {
            prompt.push_str("Happy path: call the method with typical valid arguments ");
            if method.returns_void() {
                prompt.push_str("and check that it completes without throwing.\n");
            } else {
                prompt.push_str("and assert the returned value with assertEquals.\n");
            }
        }
        ScenarioKind::BoundaryCase { parameter, value } => {
            prompt.push_str(&format!(
                "Boundary case: pass {} for parameter `{}`, typical values for the rest, and assert the result with assertEquals.\n",
                value, parameter
            ));
        }
        ScenarioKind::ExceptionCase { exception, trigger } => {
            prompt.push_str(&format!(
                "Exception case: assert that the call throws {} using assertThrows({}.class, () -> ...).\n",
                exception, exception
            ));
            if let Some(t) = trigger {
                prompt.push_str(&format!("Trigger it by passing {} for parameter `{}`.\n", t.value, t.parameter));
            }
        }
    }
    prompt.push('\n');

    prompt.push_str("[OUTPUT]\n");
    prompt.push_str(&format!(
        "Name the test method `{}`. Output only:\n@Test\nvoid {}() {{\n    ...\n}}\n",
        scenario.test_name, scenario.test_name
    ));

    prompt
}

/// Local variable name for an instance of `class_name`
pub fn instance_name(class_name: &str) -> String {
    let mut chars = class_name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => "instance".to_string(),
    }
}
