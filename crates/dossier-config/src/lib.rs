use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Simple configuration for dossier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Display label stamped on every guess and reply. There is no real
    /// identity anywhere in this system.
    #[serde(default = "default_author_label")]
    pub author_label: String,

    /// Glyph repeated to draw a redaction mask.
    #[serde(default = "default_mask_glyph")]
    pub mask_glyph: char,

    #[serde(default)]
    pub oracle: OracleConfig,

    #[serde(default)]
    pub narration: NarrationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Environment variable holding the generative API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_text_model")]
    pub text_model: String,

    #[serde(default = "default_video_model")]
    pub video_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrationConfig {
    #[serde(default = "default_narration_enabled")]
    pub enabled: bool,

    /// Text-to-speech binary to use. When unset, the first of the known
    /// system binaries found on PATH wins.
    #[serde(default)]
    pub command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            author_label: default_author_label(),
            mask_glyph: default_mask_glyph(),
            oracle: OracleConfig::default(),
            narration: NarrationConfig::default(),
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            text_model: default_text_model(),
            video_model: default_video_model(),
        }
    }
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled: default_narration_enabled(),
            command: None,
        }
    }
}

fn default_author_label() -> String {
    "ANONYMOUS INVESTIGATOR".to_string()
}

fn default_mask_glyph() -> char {
    '█'
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_text_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_video_model() -> String {
    "veo-3.1-fast-generate-preview".to_string()
}

fn default_narration_enabled() -> bool {
    true
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();
        Self::load_from(&path)
    }

    /// Load config from a specific path, writing the defaults there on
    /// first run.
    pub fn load_from(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(path, content)?;
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "dossier", "dossier") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.dossier/config.toml")
        }
    }
}
