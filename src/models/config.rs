use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration loaded from junitgen.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Generative backend (Ollama chat API) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Ollama API URL
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Model name to use
    #[serde(default = "default_model")]
    pub model: String,
    /// Timeout in seconds for a single generation request
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Maximum tokens the model may produce per call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            model: default_model(),
            timeout_seconds: default_timeout(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "qwen2.5-coder:latest".to_string()
}

fn default_timeout() -> u64 {
    300
}

fn default_max_tokens() -> u32 {
    1000
}

/// Behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Minimum delay between consecutive backend calls
    #[serde(default = "default_min_call_delay")]
    pub min_call_delay_seconds: u64,
    /// Skip the backend entirely and render every scenario from templates
    #[serde(default)]
    pub offline: bool,
    /// Echo backend tokens to stdout as they arrive
    #[serde(default)]
    pub stream_output: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            min_call_delay_seconds: default_min_call_delay(),
            offline: false,
            stream_output: false,
        }
    }
}

fn default_min_call_delay() -> u64 {
    10
}

impl BehaviorConfig {
    pub fn min_call_delay(&self) -> Duration {
        Duration::from_secs(self.min_call_delay_seconds)
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the generated test class is written to
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

/// CLI values that take precedence over junitgen.toml
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub model: Option<String>,
    pub url: Option<String>,
    pub timeout: Option<u64>,
    pub delay: Option<u64>,
    pub max_tokens: Option<u32>,
    pub output_dir: Option<PathBuf>,
    pub offline: bool,
    pub stream: bool,
}

impl Config {
    /// Load config from a TOML file
    pub fn load_from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(path.clone(), e))
    }

    /// Try to load config from junitgen.toml in the given directory
    pub fn load_from_dir(dir: &PathBuf) -> Result<Self, ConfigError> {
        let config_path = dir.join("junitgen.toml");
        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge CLI overrides into the config
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(m) = overrides.model {
            self.backend.model = m;
        }
        if let Some(u) = overrides.url {
            self.backend.url = u;
        }
        if let Some(t) = overrides.timeout {
            self.backend.timeout_seconds = t;
        }
        if let Some(n) = overrides.max_tokens {
            self.backend.max_tokens = n;
        }
        if let Some(d) = overrides.delay {
            self.behavior.min_call_delay_seconds = d;
        }
        if let Some(dir) = overrides.output_dir {
            self.output.dir = dir;
        }
        if overrides.offline {
            self.behavior.offline = true;
        }
        if overrides.stream {
            self.behavior.stream_output = true;
        }
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, toml::de::Error),
}
