use crate::models::{RenderedTest, SourceUnit, TestSuiteDocument};

/// Imports every generated test class starts with
const JUNIT_IMPORTS: &[&str] = &[
    "org.junit.jupiter.api.Test",
    "static org.junit.jupiter.api.Assertions.*",
];

/// Test class name for a class under test
pub fn test_class_name(class_name: &str) -> String {
    format!("{}Test", class_name)
}

/// Wrap rendered tests in a test class mirroring the source's package and imports
pub fn assemble_suite(unit: &SourceUnit, tests: Vec<RenderedTest>) -> TestSuiteDocument {
    let mut imports: Vec<String> = JUNIT_IMPORTS.iter().map(|s| s.to_string()).collect();
    for import in &unit.imports {
        if !imports.contains(import) {
            imports.push(import.clone());
        }
    }

    TestSuiteDocument {
        package: unit.package.clone(),
        imports,
        class_name: test_class_name(&unit.class_name),
        tests,
    }
}
