#![allow(dead_code)]
//! Common test utilities

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use junitgen::core::{CompletionBackend, CompletionRequest};
use junitgen::error::BackendError;
use junitgen::models::Config;

/// The bundled sample class
pub fn calculator_source() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("sample_inputs/Calculator.java");
    fs::read_to_string(path).expect("Failed to read sample Calculator.java")
}

/// Config with no inter-call delay
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.behavior.min_call_delay_seconds = 0;
    config.backend.timeout_seconds = 5;
    config
}

/// Create a temp project containing one Java source file
pub fn create_test_project(file_name: &str, source: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let project_root = temp_dir.path().to_path_buf();
    let input = project_root.join(file_name);
    fs::write(&input, source).expect("Failed to write source file");
    (temp_dir, project_root, input)
}

/// Backend that always fails
pub struct FailingBackend;

impl CompletionBackend for FailingBackend {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, BackendError> {
        Err(BackendError::HttpError {
            status: 429,
            message: "ThrottlingException".to_string(),
        })
    }
}

/// Backend that answers every prompt with a well-formed test echoing the
/// requested method name, and records the prompts it saw
pub struct EchoBackend {
    pub prompts: RefCell<Vec<String>>,
}

impl EchoBackend {
    pub fn new() -> Self {
        Self { prompts: RefCell::new(Vec::new()) }
    }
}

impl CompletionBackend for EchoBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, BackendError> {
        self.prompts.borrow_mut().push(request.prompt.clone());
        Ok(format!(
            "Here's the test:\n```java\n@Test\nvoid generated() {{\n    // from prompt {}\n    assertTrue(true);\n}}\n```\nExplanation: trivially true.",
            self.prompts.borrow().len()
        ))
    }
}
