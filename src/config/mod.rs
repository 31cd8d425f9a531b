//! Settings file, by default `<config_dir>/promptfolio/config.toml`.
//!
//! Every field has a default, so a missing file or a partial one is fine.

use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::ConfigError;
use crate::provider::{ProviderKind, ProviderSettings};

const APP_DIR: &str = "promptfolio";
const CONFIG_FILE: &str = "config.toml";
const DATA_FILE: &str = "prompt-folio-data.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the aggregate is stored; `<data_dir>/promptfolio/...` when unset.
    pub data_file: Option<PathBuf>,
    /// Per-request timeout. Unset means no timeout.
    pub timeout_secs: Option<u64>,
    pub model_a: ProviderKind,
    pub model_b: ProviderKind,
    pub providers: ProviderSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            timeout_secs: None,
            model_a: ProviderKind::OpenAI,
            model_b: ProviderKind::Anthropic,
            providers: ProviderSettings::default(),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(dirs::config_dir()
            .ok_or(ConfigError::NoDir("config"))?
            .join(APP_DIR)
            .join(CONFIG_FILE))
    }

    /// Load `path`, or the default location when `None`. A missing file
    /// yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn data_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(p) = &self.data_file {
            return Ok(p.clone());
        }
        Ok(dirs::data_dir()
            .ok_or(ConfigError::NoDir("data"))?
            .join(APP_DIR)
            .join(DATA_FILE))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg.model_a, ProviderKind::OpenAI);
        assert_eq!(cfg.model_b, ProviderKind::Anthropic);
        assert_eq!(cfg.providers.openai.model, "gpt-4o");
        assert!(cfg.timeout().is_none());
    }

    #[test]
    fn partial_override() {
        let cfg = Config::from_toml(
            r#"
data_file = "/tmp/pf.json"
timeout_secs = 30
model_b = "gemini"

[providers.anthropic]
max_tokens = 2048
"#,
        )
        .unwrap();
        assert_eq!(cfg.data_path().unwrap(), PathBuf::from("/tmp/pf.json"));
        assert_eq!(cfg.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(cfg.model_b, ProviderKind::Gemini);
        assert_eq!(cfg.providers.anthropic.max_tokens, 2048);
        assert_eq!(cfg.providers.anthropic.api_version, "2023-06-01");
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert!(cfg.data_file.is_none());
    }
}
