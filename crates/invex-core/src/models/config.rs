//! Configuration structures for the extraction run.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default generation endpoint of a local Ollama server.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";

/// Default vision model.
pub const DEFAULT_MODEL: &str = "qwen3-vl:30b-a3b-instruct-q8_0";

/// Main configuration for invex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvexConfig {
    /// Inference endpoint configuration.
    pub inference: InferenceConfig,

    /// Output configuration.
    pub output: OutputConfig,

    /// Prompt configuration.
    pub prompt: PromptConfig,
}

/// Settings handed to the inference client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Generation endpoint URL.
    pub endpoint: String,

    /// Model identifier sent with every request.
    pub model: String,

    /// Ask the endpoint for incremental delivery.
    pub stream: bool,

    /// Request timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            stream: false,
            timeout_secs: None,
        }
    }
}

impl InferenceConfig {
    /// Timeout as a duration, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Where output records are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, created on demand.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("out"),
        }
    }
}

/// Prompt source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Read the prompt template from this file instead of the built-in one.
    pub file: Option<PathBuf>,
}

impl InvexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }

    /// Resolve the prompt text: the configured file if any, else the built-in template.
    pub fn prompt_text(&self) -> Result<String, std::io::Error> {
        match &self.prompt.file {
            Some(path) => std::fs::read_to_string(path),
            None => Ok(crate::inference::INVOICE_PROMPT.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_local_ollama() {
        let config = InvexConfig::default();
        assert_eq!(config.inference.endpoint, "http://localhost:11434/api/generate");
        assert_eq!(config.inference.model, DEFAULT_MODEL);
        assert!(!config.inference.stream);
        assert_eq!(config.inference.timeout(), None);
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.prompt.file, None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"inference": {"model": "llava:13b", "timeout_secs": 30}}"#)
            .unwrap();

        let config = InvexConfig::from_file(&path).unwrap();
        assert_eq!(config.inference.model, "llava:13b");
        assert_eq!(config.inference.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.inference.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = InvexConfig::default();
        config.output.dir = PathBuf::from("results");
        config.inference.stream = true;

        config.save(&path).unwrap();
        assert_eq!(InvexConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let err = InvexConfig::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_prompt_text_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.txt");
        std::fs::write(&path, "Extract the total.").unwrap();

        let mut config = InvexConfig::default();
        assert!(config.prompt_text().unwrap().contains("JSON"));

        config.prompt.file = Some(path);
        assert_eq!(config.prompt_text().unwrap(), "Extract the total.");
    }
}
