use std::fs;
use std::path::Path;

use crate::commands::validate_input;
use crate::core::{extract, plan_all};
use crate::error::JunitGenError;

/// Show the extracted methods and planned scenarios without calling a backend
pub fn show_plan(input: &Path) -> Result<(), JunitGenError> {
    validate_input(input)?;
    let source = fs::read_to_string(input)?;
    let unit = extract(&source)?;

    match &unit.package {
        Some(package) => println!("=== {} ({}) ===\n", unit.class_name, package),
        None => println!("=== {} ===\n", unit.class_name),
    }

    if unit.methods.is_empty() {
        println!("No testable methods found.");
        return Ok(());
    }

    let scenarios = plan_all(&unit.methods);
    for method in &unit.methods {
        println!("{}", method.signature);
        if !method.declared_exceptions.is_empty() {
            println!("  throws: {}", method.declared_exceptions.join(", "));
        }
        for scenario in scenarios.iter().filter(|s| std::ptr::eq(s.method, method)) {
            println!("  {} [{}]", scenario.test_name, scenario.kind);
        }
        println!();
    }

    println!("{} methods, {} scenarios", unit.methods.len(), scenarios.len());
    Ok(())
}
