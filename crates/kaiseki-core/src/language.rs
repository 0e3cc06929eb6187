use serde::{Deserialize, Serialize};

use crate::error::TokenizeError;

/// Morphological analysis interface for language implementations
pub trait Tokenizer: Send + Sync {
    /// Break a cleaned sentence into morphemes, in order
    fn tokenize(&self, sentence: &str) -> Result<Vec<Morpheme>, TokenizeError>;

    /// Short backend name used in logs
    fn name(&self) -> &'static str;
}

/// Reference corpus frequency ranks (lower = more common)
///
/// Implementations resolve unknown keys to a fixed "rarer than anything
/// known" rank instead of returning `None`, so every observed lemma and
/// kanji can be placed on the global scale.
pub trait FrequencyProvider: Send + Sync {
    /// Global rank of a vocabulary lemma
    fn vocab_rank(&self, lemma: &str) -> u32;

    /// Global rank of a single kanji
    fn kanji_rank(&self, kanji: char) -> u32;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morpheme {
    pub surface: String,
    /// Dictionary form the surface resolves to
    pub lemma: String,
}

impl Morpheme {
    pub fn new(surface: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            lemma: lemma.into(),
        }
    }

    pub fn dictionary_form(&self) -> &str {
        &self.lemma
    }
}

/// Segmentation granularity requested from the tokenizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Finest units the backend can produce
    #[default]
    Short,
    /// Compound-preserving units
    Long,
}

impl SplitMode {
    /// Parse mode from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "short" | "a" => Some(SplitMode::Short),
            "long" | "c" => Some(SplitMode::Long),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SplitMode::Short => "short",
            SplitMode::Long => "long",
        }
    }
}
