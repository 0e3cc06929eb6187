use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_vocab_path() -> PathBuf {
    PathBuf::from("data/vocab_freq.csv")
}

fn default_kanji_path() -> PathBuf {
    PathBuf::from("data/kanji_freq.csv")
}

/// Locations of the two reference frequency tables
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ReferenceConfig {
    #[serde(default = "default_vocab_path")]
    pub vocab_path: PathBuf,
    #[serde(default = "default_kanji_path")]
    pub kanji_path: PathBuf,
}

impl ReferenceConfig {
    pub(crate) fn apply_env(&mut self) {
        if let Ok(path) = env::var("KAISEKI_VOCAB_FREQ") {
            self.vocab_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("KAISEKI_KANJI_FREQ") {
            self.kanji_path = PathBuf::from(path);
        }
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            vocab_path: default_vocab_path(),
            kanji_path: default_kanji_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_env::with_env;

    #[test]
    fn test_env_overrides_paths() {
        let mut config = ReferenceConfig::default();
        with_env(
            &[
                ("KAISEKI_VOCAB_FREQ", Some("/srv/freq/vocab.csv")),
                ("KAISEKI_KANJI_FREQ", Some("/srv/freq/kanji.csv")),
            ],
            || config.apply_env(),
        );
        assert_eq!(config.vocab_path, PathBuf::from("/srv/freq/vocab.csv"));
        assert_eq!(config.kanji_path, PathBuf::from("/srv/freq/kanji.csv"));
    }

    #[test]
    fn test_unset_env_keeps_paths() {
        let mut config = ReferenceConfig {
            vocab_path: PathBuf::from("mine/vocab.csv"),
            kanji_path: PathBuf::from("mine/kanji.csv"),
        };
        with_env(
            &[("KAISEKI_VOCAB_FREQ", None), ("KAISEKI_KANJI_FREQ", None)],
            || config.apply_env(),
        );
        assert_eq!(config.vocab_path, PathBuf::from("mine/vocab.csv"));
        assert_eq!(config.kanji_path, PathBuf::from("mine/kanji.csv"));
    }
}
