use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::{load_config, run_pipeline, CancellationFlag, OllamaClient, RenderSummary};
use crate::error::JunitGenError;
use crate::models::ConfigOverrides;

/// Generate options
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Java source file to generate tests for
    pub input: PathBuf,
    /// Values that override junitgen.toml
    pub overrides: ConfigOverrides,
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output_path: PathBuf,
    pub summary: RenderSummary,
}

/// Check that the input exists and is a Java source file
pub fn validate_input(input: &Path) -> Result<(), JunitGenError> {
    if !input.is_file() {
        return Err(JunitGenError::InputNotFound(input.to_path_buf()));
    }
    if input.extension().and_then(|e| e.to_str()) != Some("java") {
        return Err(JunitGenError::NotJavaSource(input.to_path_buf()));
    }
    Ok(())
}

/// Generate a JUnit test class for one Java source file and write it to disk
pub async fn generate_tests(
    project_root: &PathBuf,
    options: GenerateOptions,
    cancel: &CancellationFlag,
) -> Result<GenerateReport, JunitGenError> {
    validate_input(&options.input)?;
    let config = load_config(project_root, options.overrides)?;

    info!("Processing Java file: {}", options.input.display());
    let source = fs::read_to_string(&options.input)?;

    let output = if config.behavior.offline {
        info!("Offline mode: rendering every scenario from templates");
        run_pipeline::<OllamaClient>(&source, None, &config, cancel).await?
    } else {
        let client = OllamaClient::new(config.backend.clone(), config.behavior.stream_output)?;
        match client.health_check().await {
            Ok(true) => {
                if let Ok(false) = client.check_model().await {
                    warn!("Model '{}' may not be available; failed calls will use templates",
                        config.backend.model);
                }
                run_pipeline(&source, Some(&client), &config, cancel).await?
            }
            Ok(false) | Err(_) => {
                warn!("Backend at {} is not reachable; rendering every scenario from templates",
                    config.backend.url);
                run_pipeline::<OllamaClient>(&source, None, &config, cancel).await?
            }
        }
    };

    let output_dir = project_root.join(&config.output.dir);
    fs::create_dir_all(&output_dir)?;
    let output_path = output_dir.join(output.document.file_name());
    fs::write(&output_path, output.document.to_source())?;
    info!("Generated test file: {}", output_path.display());

    Ok(GenerateReport {
        output_path,
        summary: output.summary,
    })
}

/// Print the end-of-run summary
pub fn print_generate_report(report: &GenerateReport) {
    println!("\n=== Generation Summary ===");
    println!("{}", report.summary);
    println!("Output:    {}", report.output_path.display());

    if report.summary.fallback > 0 {
        println!("\n{} test(s) use placeholder values; review the TODO markers before running them.",
            report.summary.fallback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_input_missing() {
        let err = validate_input(Path::new("/definitely/not/here/Foo.java")).unwrap_err();
        assert!(matches!(err, JunitGenError::InputNotFound(_)));
    }

    #[test]
    fn test_validate_input_wrong_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Foo.kt");
        fs::write(&path, "class Foo").unwrap();
        let err = validate_input(&path).unwrap_err();
        assert!(matches!(err, JunitGenError::NotJavaSource(_)));
    }

    #[test]
    fn test_validate_input_ok() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Foo.java");
        fs::write(&path, "public class Foo {}").unwrap();
        assert!(validate_input(&path).is_ok());
    }
}
