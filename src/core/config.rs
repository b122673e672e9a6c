use std::path::PathBuf;
use tracing::info;

use crate::error::JunitGenError;
use crate::models::{Config, ConfigOverrides};

/// Load configuration from project directory with CLI overrides
pub fn load_config(
    project_root: &PathBuf,
    overrides: ConfigOverrides,
) -> Result<Config, JunitGenError> {
    let config = Config::load_from_dir(project_root)?;
    let config = config.with_overrides(overrides);

    info!(
        "Configuration loaded: model={}, url={}, delay={}s, max_tokens={}",
        config.backend.model,
        config.backend.url,
        config.behavior.min_call_delay_seconds,
        config.backend.max_tokens
    );

    Ok(config)
}
