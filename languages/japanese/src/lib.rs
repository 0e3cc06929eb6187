pub mod aggregator;
pub mod analyzer;
pub mod frequency;
pub mod script;
pub mod segmenter;
pub mod summary;
pub mod tokenizer;

#[cfg(test)]
mod test_support;

pub use aggregator::{CountTable, DocumentStats, FrequencyAggregator};
pub use analyzer::Analyzer;
pub use frequency::{KANJI_UNKNOWN_RANK, ReferenceFrequencyLookup, VOCAB_UNKNOWN_RANK};
pub use segmenter::SentenceSegmenter;
pub use summary::{Analysis, DerivedStats, StatisticsSummarizer, difficulty, percentile};
pub use tokenizer::LinderaTokenizer;
