use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use self::reference::ReferenceConfig;
use self::tokenizer::TokenizerConfig;

pub mod reference;
pub mod tokenizer;

#[cfg(test)]
mod test_env;

const DEFAULT_CONFIG_FILE: &str = "kaiseki.json";

fn default_log_filter() -> String {
    "warn".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub reference: ReferenceConfig,
    pub tokenizer: TokenizerConfig,

    /// Fallback tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference: ReferenceConfig::default(),
            tokenizer: TokenizerConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Defaults, then the JSON config file if any, then environment overrides
    pub fn load() -> anyhow::Result<Self> {
        match dotenvy::dotenv() {
            Err(e) if !e.not_found() => tracing::warn!("Failed to read .env: {e}"),
            _ => {}
        }

        let mut config = match config_file_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load config from a JSON file, missing fields fall back to defaults
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path)
            .with_context(|| format!("Failed to open config {}", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    fn apply_env(&mut self) {
        self.reference.apply_env();
        self.tokenizer.apply_env();
        if let Ok(filter) = env::var("KAISEKI_LOG") {
            self.log_filter = filter;
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = env::var("KAISEKI_CONFIG") {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.exists().then_some(local)
}

#[cfg(test)]
mod tests {
    use kaiseki_core::SplitMode;

    use super::*;
    use crate::test_env::with_env;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.reference.vocab_path, PathBuf::from("data/vocab_freq.csv"));
        assert_eq!(config.reference.kanji_path, PathBuf::from("data/kanji_freq.csv"));
        assert_eq!(config.tokenizer.mode, SplitMode::Short);
        assert_eq!(config.tokenizer.dictionary, "embedded://ipadic");
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "tokenizer": { "mode": "long" }, "log_filter": "debug" }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.tokenizer.mode, SplitMode::Long);
        assert_eq!(config.tokenizer.dictionary, "embedded://ipadic");
        assert_eq!(config.reference.kanji_path, PathBuf::from("data/kanji_freq.csv"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file(Path::new("does/not/exist.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_order_file_then_env() {
        let path = std::env::temp_dir().join(format!("kaiseki-config-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "reference": { "vocab_path": "file/vocab.csv", "kanji_path": "file/kanji.csv" },
                "tokenizer": { "mode": "long" }, "log_filter": "info" }"#,
        )
        .unwrap();
        let config_path = path.to_str().unwrap();

        let config = with_env(
            &[
                ("KAISEKI_CONFIG", Some(config_path)),
                ("KAISEKI_VOCAB_FREQ", Some("env/vocab.csv")),
                ("KAISEKI_KANJI_FREQ", None),
                ("KAISEKI_SPLIT_MODE", None),
                ("KAISEKI_LOG", Some("debug")),
            ],
            Config::load,
        )
        .unwrap();

        // env beats file, file beats defaults
        assert_eq!(config.reference.vocab_path, PathBuf::from("env/vocab.csv"));
        assert_eq!(config.reference.kanji_path, PathBuf::from("file/kanji.csv"));
        assert_eq!(config.tokenizer.mode, SplitMode::Long);
        assert_eq!(config.log_filter, "debug");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_config_file_fails() {
        let result = with_env(
            &[("KAISEKI_CONFIG", Some("does/not/exist.json"))],
            Config::load,
        );
        assert!(result.is_err());
    }
}
