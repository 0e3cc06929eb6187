use std::env;

use kaiseki_core::SplitMode;
use serde::{Deserialize, Serialize};

fn default_dictionary() -> String {
    "embedded://ipadic".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TokenizerConfig {
    pub mode: SplitMode,
    /// Dictionary URI handed to the morphological analyzer
    #[serde(default = "default_dictionary")]
    pub dictionary: String,
}

impl TokenizerConfig {
    pub(crate) fn apply_env(&mut self) {
        if let Ok(value) = env::var("KAISEKI_SPLIT_MODE") {
            match SplitMode::from_str(&value) {
                Some(mode) => self.mode = mode,
                None => tracing::warn!("Ignoring unknown KAISEKI_SPLIT_MODE: {value}"),
            }
        }
    }
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            mode: SplitMode::default(),
            dictionary: default_dictionary(),
        }
    }
}
