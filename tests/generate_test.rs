//! Integration tests for the generate command

use std::fs;

use junitgen::commands::{generate_tests, GenerateOptions};
use junitgen::core::CancellationFlag;
use junitgen::error::JunitGenError;
use junitgen::models::ConfigOverrides;

mod common;

use common::{calculator_source, create_test_project};

#[tokio::test]
async fn test_generate_offline_writes_test_class() {
    let (_temp_dir, project_root, input) = create_test_project("Calculator.java", &calculator_source());

    let options = GenerateOptions {
        input,
        overrides: ConfigOverrides {
            offline: true,
            ..ConfigOverrides::default()
        },
    };
    let report = generate_tests(&project_root, options, &CancellationFlag::new())
        .await
        .unwrap();

    assert_eq!(report.output_path, project_root.join("outputs").join("CalculatorTest.java"));
    assert_eq!(report.summary.generated, 0);
    assert_eq!(report.summary.fallback, report.summary.scenarios);

    let written = fs::read_to_string(&report.output_path).unwrap();
    assert!(written.contains("import org.junit.jupiter.api.Test;"));
    assert!(written.contains("import static org.junit.jupiter.api.Assertions.*;"));
    assert!(written.contains("import java.util.List;"));
    assert!(written.contains("void testDivideThrowsIllegalArgumentException() {"));
    assert!(written.contains("void testClearHistoryHappyPath() {"));
}

#[tokio::test]
async fn test_generate_unreachable_backend_falls_back() {
    let (_temp_dir, project_root, input) = create_test_project("Calculator.java", &calculator_source());

    let options = GenerateOptions {
        input,
        overrides: ConfigOverrides {
            url: Some("http://127.0.0.1:9".to_string()),
            delay: Some(0),
            output_dir: Some("generated".into()),
            ..ConfigOverrides::default()
        },
    };
    let report = generate_tests(&project_root, options, &CancellationFlag::new())
        .await
        .unwrap();

    assert!(report.output_path.starts_with(project_root.join("generated")));
    assert_eq!(report.summary.generated, 0);
    assert!(report.output_path.exists());
}

#[tokio::test]
async fn test_generate_uses_config_file() {
    let (_temp_dir, project_root, input) = create_test_project("Calculator.java", &calculator_source());
    fs::write(
        project_root.join("junitgen.toml"),
        "[behavior]\noffline = true\n\n[output]\ndir = \"src/test/java\"\n",
    )
    .unwrap();

    let options = GenerateOptions {
        input,
        overrides: ConfigOverrides::default(),
    };
    let report = generate_tests(&project_root, options, &CancellationFlag::new())
        .await
        .unwrap();

    assert_eq!(
        report.output_path,
        project_root.join("src/test/java").join("CalculatorTest.java")
    );
}

#[tokio::test]
async fn test_generate_fails_without_type_declaration() {
    let (_temp_dir, project_root, input) =
        create_test_project("Shape.java", "public interface Shape {\n    double area();\n}\n");

    let options = GenerateOptions {
        input,
        overrides: ConfigOverrides {
            offline: true,
            ..ConfigOverrides::default()
        },
    };
    let err = generate_tests(&project_root, options, &CancellationFlag::new())
        .await
        .unwrap_err();

    assert!(matches!(err, JunitGenError::Extraction(_)));
    assert!(!project_root.join("outputs").exists());
}

#[tokio::test]
async fn test_generate_rejects_non_java_input() {
    let (_temp_dir, project_root, input) = create_test_project("notes.txt", "hello");

    let options = GenerateOptions {
        input,
        overrides: ConfigOverrides::default(),
    };
    let err = generate_tests(&project_root, options, &CancellationFlag::new())
        .await
        .unwrap_err();

    assert!(matches!(err, JunitGenError::NotJavaSource(_)));
}
