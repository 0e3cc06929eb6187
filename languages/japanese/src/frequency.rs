use std::collections::HashMap;
use std::hash::Hash;
use std::path::Path;

use kaiseki_core::{AnalysisError, FrequencyProvider};

/// Rank given to lemmas missing from the reference table
pub const VOCAB_UNKNOWN_RANK: u32 = 317_300;
/// Rank given to kanji missing from the reference table
pub const KANJI_UNKNOWN_RANK: u32 = 5_526;

/// Global frequency ranks for vocabulary and kanji
///
/// Built once at startup and shared by reference afterwards; nothing
/// mutates it after construction.
#[derive(Debug, Default)]
pub struct ReferenceFrequencyLookup {
    vocab: HashMap<String, u32>,
    kanji: HashMap<char, u32>,
}

impl ReferenceFrequencyLookup {
    /// Load both tables from CSV files (`key,rank` rows after a header)
    pub fn load(vocab_path: &Path, kanji_path: &Path) -> Result<Self, AnalysisError> {
        let vocab_csv = read_table(vocab_path)?;
        let kanji_csv = read_table(kanji_path)?;
        let lookup = Self::from_csv(&vocab_csv, &kanji_csv);
        tracing::info!(
            "Loaded {} vocab and {} kanji reference ranks",
            lookup.vocab_len(),
            lookup.kanji_len()
        );
        Ok(lookup)
    }

    /// Build from in-memory CSV text
    pub fn from_csv(vocab_csv: &str, kanji_csv: &str) -> Self {
        let vocab = parse_table(vocab_csv, |key| Some(key.to_string()));
        let kanji = parse_table(kanji_csv, |key| {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        });

        Self { vocab, kanji }
    }

    pub fn vocab_len(&self) -> usize {
        self.vocab.len()
    }

    pub fn kanji_len(&self) -> usize {
        self.kanji.len()
    }
}

impl FrequencyProvider for ReferenceFrequencyLookup {
    fn vocab_rank(&self, lemma: &str) -> u32 {
        self.vocab.get(lemma).copied().unwrap_or(VOCAB_UNKNOWN_RANK)
    }

    fn kanji_rank(&self, kanji: char) -> u32 {
        self.kanji.get(&kanji).copied().unwrap_or(KANJI_UNKNOWN_RANK)
    }
}

fn read_table(path: &Path) -> Result<String, AnalysisError> {
    tracing::debug!("Reading reference table {}", path.display());
    std::fs::read_to_string(path).map_err(|source| AnalysisError::MissingReferenceData {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse `key,rank` rows after a header record. Later duplicates win.
fn parse_table<K, F>(content: &str, key_of: F) -> HashMap<K, u32>
where
    K: Eq + Hash,
    F: Fn(&str) -> Option<K>,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut table = HashMap::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Skipping unreadable reference row: {e}");
                continue;
            }
        };
        let line = record.position().map_or(0, |p| p.line());

        let (Some(raw_key), Some(raw_rank)) = (record.get(0), record.get(1)) else {
            tracing::warn!("Skipping reference row {line}: expected key,rank");
            continue;
        };

        match (key_of(raw_key), raw_rank.parse::<u32>()) {
            (Some(key), Ok(rank)) => {
                table.insert(key, rank);
            }
            _ => tracing::warn!("Skipping malformed reference row {line}: {raw_key},{raw_rank}"),
        }
    }

    table
}
