use std::cmp::Ordering;

use kaiseki_core::FrequencyProvider;

use crate::aggregator::DocumentStats;

/// Upper asymptote of the difficulty curve
const DIFFICULTY_CEILING: f64 = 10.272;
/// Steepness of the curve per unit of kanji rank
const DIFFICULTY_SLOPE: f64 = 0.00168;
/// Shifts the midpoint of the curve to rank 4 / slope (~2381)
const DIFFICULTY_OFFSET: f64 = 4.0;
const DIFFICULTY_FLOOR: f64 = 1.0;

/// Lemma paired with an in-document count or a global rank
pub type VocabEntry = (String, u32);
/// Kanji paired with an in-document count or a global rank
pub type KanjiEntry = (char, u32);

/// Metrics derived once from a finished [`DocumentStats`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedStats {
    pub unique_vocab: usize,
    pub unique_vocab_once: usize,
    pub unique_kanji: usize,
    pub unique_kanji_once: usize,
    /// Global rank of the kanji at the 90th percentile
    pub p90_kanji_freq: u32,
    pub avg_sentence_len: f64,
    /// Kanji occurrences per character, 0.0..=1.0
    pub kanji_density: f64,
    pub difficulty: f64,

    /// Most used first
    pub vocab_local_freq: Vec<VocabEntry>,
    pub kanji_local_freq: Vec<KanjiEntry>,
    /// Commonest (lowest rank) first
    pub vocab_global_freq: Vec<VocabEntry>,
    pub kanji_global_freq: Vec<KanjiEntry>,
}

impl DerivedStats {
    /// Nearest-rank percentile over the global ranks of the document's vocabulary
    pub fn vocab_percentile(&self, p: f64) -> u32 {
        let ranks: Vec<u32> = self.vocab_global_freq.iter().map(|(_, rank)| *rank).collect();
        percentile(&ranks, p)
    }
}

/// Finalized, read-only result of analyzing one document
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub document: DocumentStats,
    pub derived: DerivedStats,
}

pub struct StatisticsSummarizer<'r> {
    reference: &'r dyn FrequencyProvider,
}

impl<'r> StatisticsSummarizer<'r> {
    pub fn new(reference: &'r dyn FrequencyProvider) -> Self {
        Self { reference }
    }

    /// Consume the raw counts and derive every metric
    ///
    /// A document with no surviving sentences keeps all derived fields at
    /// their defaults.
    pub fn finalize(&self, document: DocumentStats) -> Analysis {
        if document.sentence_count == 0 {
            return Analysis {
                document,
                derived: DerivedStats::default(),
            };
        }

        let mut vocab_local_freq = document.vocab.entries().to_vec();
        // stable: equal counts stay in first-appearance order
        vocab_local_freq.sort_by(by_local_count_desc);
        let mut kanji_local_freq = document.kanji.entries().to_vec();
        kanji_local_freq.sort_by(by_local_count_desc);

        let mut vocab_global_freq: Vec<VocabEntry> = document
            .vocab
            .keys()
            .map(|lemma| (lemma.clone(), self.reference.vocab_rank(lemma)))
            .collect();
        // stable: equal ranks stay in first-appearance order
        vocab_global_freq.sort_by(by_global_rank_asc);
        let mut kanji_global_freq: Vec<KanjiEntry> = document
            .kanji
            .keys()
            .map(|&kanji| (kanji, self.reference.kanji_rank(kanji)))
            .collect();
        kanji_global_freq.sort_by(by_global_rank_asc);

        let p90_kanji_freq = if document.kanji_count == 0 {
            0
        } else {
            let ranks: Vec<u32> = kanji_global_freq.iter().map(|(_, rank)| *rank).collect();
            percentile(&ranks, 90.0)
        };

        let avg_sentence_len = round_to(
            document.char_count as f64 / document.sentence_count as f64,
            1,
        );
        let kanji_density = kanji_density(document.kanji_count, document.char_count);

        let derived = DerivedStats {
            unique_vocab: document.vocab.len(),
            unique_vocab_once: document.vocab.once_count(),
            unique_kanji: document.kanji.len(),
            unique_kanji_once: document.kanji.once_count(),
            p90_kanji_freq,
            avg_sentence_len,
            kanji_density,
            difficulty: difficulty(p90_kanji_freq),
            vocab_local_freq,
            kanji_local_freq,
            vocab_global_freq,
            kanji_global_freq,
        };

        tracing::debug!(
            unique_vocab = derived.unique_vocab,
            unique_kanji = derived.unique_kanji,
            p90_kanji_freq = derived.p90_kanji_freq,
            "Finalized document statistics"
        );

        Analysis { document, derived }
    }
}

/// Higher in-document count first
fn by_local_count_desc<K>(a: &(K, u32), b: &(K, u32)) -> Ordering {
    b.1.cmp(&a.1)
}

/// Lower global rank (more common) first
fn by_global_rank_asc<K>(a: &(K, u32), b: &(K, u32)) -> Ordering {
    a.1.cmp(&b.1)
}

/// Nearest-rank percentile: value at `ceil(n * p / 100) - 1` of the sorted values
///
/// Returns 0 for an empty slice. `p` is clamped to `0.0..=100.0`.
pub fn percentile(values: &[u32], p: f64) -> u32 {
    if values.is_empty() {
        return 0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let p = p.clamp(0.0, 100.0);
    let rank = (sorted.len() as f64 * p / 100.0).ceil() as usize;
    sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
}

/// Logistic difficulty score of a 90th-percentile kanji rank, floored at 1.0
pub fn difficulty(p90_kanji_freq: u32) -> f64 {
    let x = f64::from(p90_kanji_freq);
    let score = DIFFICULTY_CEILING / (1.0 + (-(DIFFICULTY_SLOPE * x - DIFFICULTY_OFFSET)).exp());
    round_to(score.max(DIFFICULTY_FLOOR), 1)
}

fn kanji_density(kanji_count: u64, char_count: u64) -> f64 {
    if char_count == 0 {
        return 0.0;
    }
    // lemmas may spell in kanji what the surface wrote in kana
    round_to((kanji_count as f64 / char_count as f64).min(1.0), 2)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
