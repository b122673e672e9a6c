//! Scenario planning: decide which tests a method gets.
//!
//! Planning is a pure function of the method descriptor. Order is always
//! happy path, then boundary cases in parameter order, then exception cases.

use std::collections::HashSet;

use crate::models::{
    is_integral_type, zero_literal, BoundaryTrigger, MethodDescriptor, ScenarioDescriptor,
    ScenarioKind,
};

/// Name fragments that mark a method as dividing by its last numeric parameter
const DIVISION_HINTS: &[&str] = &["divide", "division", "quotient", "modulo"];

/// Exception assumed for a zero integral divisor when the body throws nothing
const DEFAULT_DIVISION_EXCEPTION: &str = "ArithmeticException";

/// Plan the scenarios for one method
pub fn plan(method: &MethodDescriptor) -> Vec<ScenarioDescriptor<'_>> {
    let mut scenarios = vec![ScenarioDescriptor {
        method,
        kind: ScenarioKind::HappyPath,
        test_name: format!("test{}HappyPath", capitalize(&method.name)),
    }];

    // A floating divisor of zero only fails if the method throws something
    // itself; otherwise it stays an ordinary boundary case
    let divisor = if suggests_division(&method.name) {
        method.numeric_parameters().last().filter(|d| {
            !method.declared_exceptions.is_empty() || is_integral_type(&d.ty)
        })
    } else {
        None
    };

    for param in method.numeric_parameters() {
        if divisor.is_some_and(|d| d.name == param.name) {
            continue;
        }
        let Some(value) = zero_literal(&param.ty) else {
            continue;
        };
        scenarios.push(ScenarioDescriptor {
            method,
            kind: ScenarioKind::BoundaryCase {
                parameter: param.name.clone(),
                value: value.to_string(),
            },
            test_name: format!(
                "test{}WithZero{}",
                capitalize(&method.name),
                capitalize(&param.name)
            ),
        });
    }

    let mut remaining = method.declared_exceptions.iter();

    if let Some(divisor) = divisor {
        let exception = remaining
            .next()
            .cloned()
            .unwrap_or_else(|| DEFAULT_DIVISION_EXCEPTION.to_string());
        let value = zero_literal(&divisor.ty).unwrap_or("0");
        scenarios.push(exception_scenario(
            method,
            exception,
            Some(BoundaryTrigger {
                parameter: divisor.name.clone(),
                value: value.to_string(),
            }),
        ));
    }

    for exception in remaining {
        scenarios.push(exception_scenario(method, exception.clone(), None));
    }

    scenarios
}

/// Plan every method, keeping method order.
///
/// Overloads would otherwise share test names, so repeated names get the
/// smallest numeric suffix not already taken (`testAddHappyPath2`).
pub fn plan_all(methods: &[MethodDescriptor]) -> Vec<ScenarioDescriptor<'_>> {
    let mut scenarios: Vec<_> = methods.iter().flat_map(plan).collect();
    let mut taken: HashSet<String> = HashSet::new();

    for scenario in &mut scenarios {
        if !taken.insert(scenario.test_name.clone()) {
            let unique = (2..)
                .map(|n| format!("{}{}", scenario.test_name, n))
                .find(|candidate| !taken.contains(candidate))
                .unwrap_or_default();
            taken.insert(unique.clone());
            scenario.test_name = unique;
        }
    }

    scenarios
}

fn exception_scenario(
    method: &MethodDescriptor,
    exception: String,
    trigger: Option<BoundaryTrigger>,
) -> ScenarioDescriptor<'_> {
    let simple = exception.rsplit('.').next().unwrap_or(&exception).to_string();
    ScenarioDescriptor {
        method,
        test_name: format!("test{}Throws{}", capitalize(&method.name), simple),
        kind: ScenarioKind::ExceptionCase { exception, trigger },
    }
}

fn suggests_division(name: &str) -> bool {
    let lower = name.to_lowercase();
    DIVISION_HINTS.iter().any(|hint| lower.contains(hint))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
