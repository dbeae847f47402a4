//! Runtime configuration: required API credential from the environment plus
//! optional tunables from `scholia.toml` in the working directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::chunks::DEFAULT_MAX_WORDS;
use crate::openai::{DEFAULT_API_BASE, DEFAULT_CHAT_MODEL, DEFAULT_EMBED_MODEL};
use crate::retriever::DEFAULT_TOP_K;

/// Environment variable holding the credential for the remote services.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

const SETTINGS_FILENAME: &str = "scholia.toml";

/// Resolved configuration, passed explicitly to the client and pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub embed_model: String,
    pub chat_model: String,
    /// Expected dimension of every embedding vector.
    pub embedding_dim: usize,
    pub max_chunk_words: usize,
    pub top_k: usize,
    pub max_answer_tokens: u32,
    pub temperature: f32,
    /// Where uploaded PDFs are stored, relative to the working directory.
    pub upload_dir: PathBuf,
}

/// Tunables as they appear in the settings file. Every field is optional;
/// missing ones fall back to defaults during [`Config::resolve`].
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    pub api_base: Option<String>,
    pub embed_model: Option<String>,
    pub chat_model: Option<String>,
    pub embedding_dim: Option<usize>,
    pub max_chunk_words: Option<usize>,
    pub top_k: Option<usize>,
    pub max_answer_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub upload_dir: Option<PathBuf>,
}

impl Config {
    /// Resolve configuration from the working directory and the process
    /// environment. The API key is required; everything else has defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = load_settings(Path::new(SETTINGS_FILENAME))?;
        let api_key = std::env::var(API_KEY_VAR).ok();
        Self::resolve(settings, api_key)
    }

    /// Combine file settings and the credential into a full configuration.
    /// Split out from [`Config::from_env`] so tests can pass values directly
    /// instead of mutating the process environment.
    pub fn resolve(settings: Settings, api_key: Option<String>) -> Result<Self, ConfigError> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        Ok(Self {
            api_key,
            api_base: settings
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            embed_model: settings
                .embed_model
                .unwrap_or_else(|| DEFAULT_EMBED_MODEL.to_string()),
            chat_model: settings
                .chat_model
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            embedding_dim: settings.embedding_dim.unwrap_or(1536),
            max_chunk_words: settings.max_chunk_words.unwrap_or(DEFAULT_MAX_WORDS),
            top_k: settings.top_k.unwrap_or(DEFAULT_TOP_K),
            max_answer_tokens: settings.max_answer_tokens.unwrap_or(150),
            temperature: settings.temperature.unwrap_or(0.7),
            upload_dir: settings.upload_dir.unwrap_or_else(|| PathBuf::from("data")),
        })
    }
}

/// Load settings from `path`. A missing file yields defaults; a file that
/// exists but fails to parse is an error, not a silent fallback.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let s = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(ConfigError::Read(path.to_path_buf(), e)),
    };
    toml::from_str(&s).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set; the remote services need a credential")]
    MissingApiKey,
    #[error("failed to read settings file {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("failed to parse settings file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}
