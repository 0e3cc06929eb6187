use kaiseki_core::{AnalysisError, FrequencyProvider, Tokenizer};

use crate::aggregator::FrequencyAggregator;
use crate::segmenter::SentenceSegmenter;
use crate::summary::{Analysis, StatisticsSummarizer};

/// Runs segmentation, aggregation and summarization over one document
pub struct Analyzer<'a> {
    tokenizer: &'a dyn Tokenizer,
    reference: &'a dyn FrequencyProvider,
}

impl<'a> Analyzer<'a> {
    pub fn new(tokenizer: &'a dyn Tokenizer, reference: &'a dyn FrequencyProvider) -> Self {
        Self {
            tokenizer,
            reference,
        }
    }

    /// Analyze already-extracted document text
    pub fn analyze_text(&self, text: &str) -> Result<Analysis, AnalysisError> {
        tracing::debug!("Analyzing {} bytes with {} tokenizer", text.len(), self.tokenizer.name());

        let segmenter = SentenceSegmenter::new(text);
        let mut aggregator = FrequencyAggregator::new(self.tokenizer);
        for sentence in segmenter.sentences() {
            aggregator.add_sentence(&sentence)?;
        }

        let document = aggregator.finish();
        if document.sentence_count == 0 {
            tracing::warn!("No Japanese sentences found");
        }

        Ok(StatisticsSummarizer::new(self.reference).finalize(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::ReferenceFrequencyLookup;
    use crate::summary::DerivedStats;
    use crate::test_support::StubTokenizer;

    fn reference() -> ReferenceFrequencyLookup {
        ReferenceFrequencyLookup::from_csv("vocab,rank\nが,6\n", "kanji,rank\n猫,1702\n好,523\n")
    }

    #[test]
    fn test_full_pipeline() {
        let tokenizer = StubTokenizer::new()
            .with("猫が好きだ", &["猫", "が", "好きだ"])
            .with("猫", &["猫"]);
        let reference = reference();
        let analyzer = Analyzer::new(&tokenizer, &reference);

        let analysis = analyzer
            .analyze_text("猫《ねこ》が好きだ。\n\nCat!「猫」")
            .unwrap();

        assert_eq!(analysis.document.sentence_count, 2);
        assert_eq!(analysis.document.char_count, 6);
        assert_eq!(analysis.document.vocab_count, 4);
        assert_eq!(analysis.document.kanji_count, 3);
        assert_eq!(analysis.derived.vocab_local_freq[0], ("猫".to_string(), 2));
        assert_eq!(analysis.derived.kanji_local_freq[0], ('猫', 2));
        assert_eq!(analysis.derived.unique_kanji_once, 1);
        assert_eq!(analysis.derived.avg_sentence_len, 3.0);
        assert_eq!(analysis.derived.kanji_density, 0.5);
    }

    #[test]
    fn test_non_japanese_document() {
        let tokenizer = StubTokenizer::new();
        let reference = reference();
        let analysis = Analyzer::new(&tokenizer, &reference)
            .analyze_text("Just English.\nNothing else 123.")
            .unwrap();

        assert_eq!(analysis.document.sentence_count, 0);
        assert_eq!(analysis.document.char_count, 0);
        assert_eq!(analysis.derived, DerivedStats::default());
    }

    #[test]
    fn test_idempotent() {
        let tokenizer = StubTokenizer::new();
        let reference = reference();
        let analyzer = Analyzer::new(&tokenizer, &reference);
        let text = "吾輩は猫である。名前はまだ無い。";

        let first = analyzer.analyze_text(text).unwrap();
        let second = analyzer.analyze_text(text).unwrap();
        assert_eq!(first.derived, second.derived);
        assert_eq!(first.document.char_count, second.document.char_count);
    }

    #[test]
    fn test_tokenizer_failure_aborts() {
        let tokenizer = StubTokenizer::new().failing_on("名前はまだ無い");
        let reference = reference();
        let result = Analyzer::new(&tokenizer, &reference).analyze_text("吾輩は猫である。名前はまだ無い。");

        assert!(matches!(result, Err(AnalysisError::TokenizerFailure { .. })));
    }
}
