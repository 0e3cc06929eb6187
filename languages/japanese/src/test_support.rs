use std::collections::{HashMap, HashSet};

use kaiseki_core::{Morpheme, TokenizeError, Tokenizer};

/// Tokenizer double: scripted sentences, otherwise one morpheme per character
#[derive(Default)]
pub struct StubTokenizer {
    scripted: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
}

impl StubTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sentence: &str, lemmas: &[&str]) -> Self {
        self.scripted.insert(
            sentence.to_string(),
            lemmas.iter().map(|l| l.to_string()).collect(),
        );
        self
    }

    pub fn failing_on(mut self, sentence: &str) -> Self {
        self.failing.insert(sentence.to_string());
        self
    }
}

impl Tokenizer for StubTokenizer {
    fn tokenize(&self, sentence: &str) -> Result<Vec<Morpheme>, TokenizeError> {
        if self.failing.contains(sentence) {
            return Err(TokenizeError(format!("cannot segment {sentence}")));
        }

        let morphemes = match self.scripted.get(sentence) {
            Some(lemmas) => lemmas.iter().map(|l| Morpheme::new(l.as_str(), l.as_str())).collect(),
            None => sentence
                .chars()
                .map(|c| Morpheme::new(c.to_string(), c.to_string()))
                .collect(),
        };
        Ok(morphemes)
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
