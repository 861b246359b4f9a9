use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::scoring::keywords::{KeywordSet, KeywordTable, DEFAULT_HIGH_RISK, DEFAULT_LOW_RISK};

/// Root configuration structure, deserialized from `.lowchol/config.toml`.
///
/// Every section is optional; anything left out falls back to the built-in defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub keywords: KeywordConfig,
    pub extractor: ExtractorConfig,
    pub ocr: OcrConfig,
}

/// Keyword lists used by the risk classifier.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Substrings marking an ingredient as high risk (+4).
    pub high: Vec<String>,
    /// Substrings marking an ingredient as low risk (-1).
    pub low: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_RISK.iter().map(|k| k.to_string()).collect(),
            low: DEFAULT_LOW_RISK.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl KeywordConfig {
    /// Build the classifier's keyword table, warning about keywords listed in both sets.
    pub fn to_table(&self) -> KeywordTable {
        let table = KeywordTable::new(KeywordSet::new(&self.high), KeywordSet::new(&self.low));
        if table.high.is_empty() {
            warn!("no high-risk keywords configured; no dish can be rated High");
        }
        let overlap = table.overlap();
        if !overlap.is_empty() {
            warn!(
                keywords = ?overlap,
                "keywords listed as both high and low risk; high risk takes priority"
            );
        }
        table
    }
}

/// Settings for the chat-completions ingredient extractor.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
    /// Dishes analyzed concurrently when a menu yields several.
    pub max_concurrent: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 30,
            max_concurrent: 4,
        }
    }
}

/// Settings for the Tesseract text recognizer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub command: String,
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: "tesseract".to_string(),
            language: "eng".to_string(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.lowchol/config.toml`
/// 3. `~/.config/lowchol/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = base_dir.join(".lowchol").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("lowchol").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    debug!("no config file found, using built-in defaults");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    debug!(path = %path.display(), "loading config");
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(dir.path(), Some(&missing)).is_err());

        let cfg = Config::default();
        assert_eq!(cfg.extractor.model, "gpt-4o-mini");
        assert_eq!(cfg.ocr.command, "tesseract");
        assert_eq!(cfg.keywords.to_table(), KeywordTable::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let cfg: Config = toml::from_str(
            r#"
[extractor]
model = "gpt-4o"
"#,
        )
        .unwrap();
        assert_eq!(cfg.extractor.model, "gpt-4o");
        assert_eq!(cfg.extractor.api_key_env, "OPENAI_API_KEY");
        assert_eq!(cfg.extractor.max_concurrent, 4);
        assert_eq!(cfg.ocr.language, "eng");
        assert_eq!(cfg.keywords.high.len(), DEFAULT_HIGH_RISK.len());
    }

    #[test]
    fn test_custom_keywords_replace_defaults() {
        let cfg: Config = toml::from_str(
            r#"
[keywords]
high = ["Lard", "  coconut oil "]
"#,
        )
        .unwrap();
        let table = cfg.keywords.to_table();
        let high: Vec<&str> = table.high.iter().collect();
        assert_eq!(high, vec!["coconut oil", "lard"]);
        assert_eq!(table.low.len(), DEFAULT_LOW_RISK.len());
    }

    #[test]
    fn test_local_config_discovered() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_dir = dir.path().join(".lowchol");
        std::fs::create_dir_all(&cfg_dir).unwrap();
        std::fs::write(cfg_dir.join("config.toml"), "[ocr]\nlanguage = \"deu\"\n").unwrap();

        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(cfg.ocr.language, "deu");
        assert_eq!(cfg.ocr.command, "tesseract");
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[extractor\nmodel = 1").unwrap();
        let err = load_config(dir.path(), Some(&path)).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }
}
