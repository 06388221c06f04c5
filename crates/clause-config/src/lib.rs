use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for clearclause
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub redaction: RedactionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Model identifiers, tried in order until one answers
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Per-model request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Ask the provider for a JSON response body
    #[serde(default = "default_json_mode")]
    pub json_mode: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// NER program and its arguments, e.g. `["python3", "ner.py"]`. It reads
    /// the document on stdin and prints entity spans as JSON. Without one,
    /// only the built-in and custom patterns run.
    #[serde(default)]
    pub ner_command: Vec<String>,

    /// Extra patterns added to the built-in recognizer
    #[serde(default)]
    pub custom_patterns: Vec<CustomPattern>,
}

impl RedactionConfig {
    /// Whether names and organizations are detected at all
    pub fn has_ner(&self) -> bool {
        !self.ner_command.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPattern {
    pub name: String,
    /// Entity type name, e.g. "PERSON", "ORG", "LOCATION"
    pub entity_type: String,
    pub pattern: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
            timeout_secs: default_timeout_secs(),
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
            json_mode: default_json_mode(),
        }
    }
}

impl AnalysisConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_models() -> Vec<String> {
    vec!["gemini-2.5-flash".to_string(), "gemini-2.0-flash".to_string()]
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_json_mode() -> bool {
    true
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            config.save_to(&path)?;
            Ok(config)
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "clearclause", "clearclause") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.clearclause/config.toml")
        }
    }
}
