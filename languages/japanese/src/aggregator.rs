use std::collections::HashMap;
use std::hash::Hash;

use kaiseki_core::{AnalysisError, Tokenizer};

use crate::script::is_kanji;

/// Occurrence counts that remember first-appearance order
#[derive(Debug, Clone)]
pub struct CountTable<K> {
    entries: Vec<(K, u32)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> CountTable<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn increment(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn get(&self, key: &K) -> u32 {
        self.index.get(key).map(|&i| self.entries[i].1).unwrap_or(0)
    }

    /// Entries in order of first appearance
    pub fn entries(&self) -> &[(K, u32)] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys seen exactly once
    pub fn once_count(&self) -> usize {
        self.entries.iter().filter(|(_, count)| *count == 1).count()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| u64::from(*count)).sum()
    }
}

impl<K: Eq + Hash + Clone> Default for CountTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw counts collected over one document
#[derive(Debug, Clone, Default)]
pub struct DocumentStats {
    pub vocab: CountTable<String>,
    pub kanji: CountTable<char>,
    pub char_count: u64,
    /// Total morphemes
    pub vocab_count: u64,
    /// Total kanji occurrences across lemmas
    pub kanji_count: u64,
    pub sentence_count: u64,
}

/// Tokenizes cleaned sentences and accumulates [`DocumentStats`]
pub struct FrequencyAggregator<'t> {
    tokenizer: &'t dyn Tokenizer,
    stats: DocumentStats,
}

impl<'t> FrequencyAggregator<'t> {
    pub fn new(tokenizer: &'t dyn Tokenizer) -> Self {
        Self {
            tokenizer,
            stats: DocumentStats::default(),
        }
    }

    /// Count one cleaned sentence. A tokenizer error aborts the document.
    pub fn add_sentence(&mut self, sentence: &str) -> Result<(), AnalysisError> {
        let morphemes = self.tokenizer.tokenize(sentence).map_err(|source| {
            AnalysisError::TokenizerFailure {
                sentence: sentence.to_string(),
                source,
            }
        })?;

        let stats = &mut self.stats;
        stats.sentence_count += 1;
        stats.char_count += sentence.chars().count() as u64;
        stats.vocab_count += morphemes.len() as u64;

        for morpheme in &morphemes {
            let lemma = morpheme.dictionary_form();
            for c in lemma.chars().filter(|c| is_kanji(*c)) {
                stats.kanji.increment(c);
                stats.kanji_count += 1;
            }
            stats.vocab.increment(lemma.to_string());
        }

        Ok(())
    }

    pub fn stats(&self) -> &DocumentStats {
        &self.stats
    }

    pub fn finish(self) -> DocumentStats {
        self.stats
    }
}
