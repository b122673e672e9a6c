use serde::Serialize;
use std::fmt;

/// Where a rendered test came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Produced by the generative backend and sanitized
    Generated,
    /// Produced by the deterministic template
    Fallback,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Generated => write!(f, "generated"),
            Provenance::Fallback => write!(f, "fallback"),
        }
    }
}

/// Source text of a single `@Test` method, indented as a class member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTest {
    pub test_name: String,
    pub source: String,
    pub backend: Provenance,
}

/// The assembled JUnit test class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSuiteDocument {
    pub package: Option<String>,
    pub imports: Vec<String>,
    pub class_name: String,
    pub tests: Vec<RenderedTest>,
}

impl TestSuiteDocument {
    /// File name the document should be written to
    pub fn file_name(&self) -> String {
        format!("{}.java", self.class_name)
    }

    pub fn count(&self, provenance: Provenance) -> usize {
        self.tests.iter().filter(|t| t.backend == provenance).count()
    }

    /// Serialize to Java source
    pub fn to_source(&self) -> String {
        let mut out = String::new();

        if let Some(package) = &self.package {
            out.push_str(&format!("package {};\n\n", package));
        }

        for import in &self.imports {
            out.push_str(&format!("import {};\n", import));
        }
        if !self.imports.is_empty() {
            out.push('\n');
        }

        out.push_str(&format!("public class {} {{\n", self.class_name));
        for test in &self.tests {
            out.push('\n');
            out.push_str(test.source.trim_end());
            out.push('\n');
        }
        out.push_str("}\n");

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test(name: &str, backend: Provenance) -> RenderedTest {
        RenderedTest {
            test_name: name.to_string(),
            source: format!("    @Test\n    void {}() {{\n    }}\n", name),
            backend,
        }
    }

    #[test]
    fn test_document_source_layout() {
        let doc = TestSuiteDocument {
            package: Some("com.example".to_string()),
            imports: vec!["org.junit.jupiter.api.Test".to_string()],
            class_name: "CalculatorTest".to_string(),
            tests: vec![test("testA", Provenance::Fallback)],
        };
        let source = doc.to_source();
        assert!(source.starts_with("package com.example;\n\nimport org.junit.jupiter.api.Test;\n"));
        assert!(source.contains("public class CalculatorTest {\n\n    @Test\n    void testA() {\n    }\n}\n"));
        assert_eq!(doc.file_name(), "CalculatorTest.java");
    }

    #[test]
    fn test_document_without_package() {
        let doc = TestSuiteDocument {
            package: None,
            imports: vec![],
            class_name: "EmptyTest".to_string(),
            tests: vec![],
        };
        assert_eq!(doc.to_source(), "public class EmptyTest {\n}\n");
    }

    #[test]
    fn test_provenance_counts() {
        let doc = TestSuiteDocument {
            package: None,
            imports: vec![],
            class_name: "CalculatorTest".to_string(),
            tests: vec![
                test("testA", Provenance::Generated),
                test("testB", Provenance::Fallback),
                test("testC", Provenance::Fallback),
            ],
        };
        assert_eq!(doc.count(Provenance::Generated), 1);
        assert_eq!(doc.count(Provenance::Fallback), 2);
    }
}
