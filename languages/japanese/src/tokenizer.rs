//! Morphological analysis backed by Lindera.

use kaiseki_core::{Morpheme, SplitMode, TokenizeError, Tokenizer};
use lindera::dictionary::load_dictionary;
use lindera::mode::{Mode, Penalty};
use lindera::segmenter::Segmenter;
use lindera::tokenizer::Tokenizer as LinderaInner;

/// IPADIC detail column holding the dictionary form
const BASE_FORM_DETAIL: usize = 6;

pub struct LinderaTokenizer {
    inner: LinderaInner,
}

impl LinderaTokenizer {
    /// Create a tokenizer from a dictionary URI such as `embedded://ipadic`
    pub fn new(mode: SplitMode, dictionary_uri: &str) -> Result<Self, TokenizeError> {
        tracing::info!("Loading tokenizer dictionary {dictionary_uri} ({} mode)", mode.as_str());
        let dictionary = load_dictionary(dictionary_uri).map_err(|e| {
            TokenizeError(format!("Failed to load dictionary {dictionary_uri}: {e}"))
        })?;

        let mode = match mode {
            // split long kanji compounds into their parts
            SplitMode::Short => Mode::Decompose(Penalty::default()),
            SplitMode::Long => Mode::Normal,
        };
        let segmenter = Segmenter::new(mode, dictionary, None);

        Ok(Self {
            inner: LinderaInner::new(segmenter),
        })
    }
}

impl Tokenizer for LinderaTokenizer {
    fn tokenize(&self, sentence: &str) -> Result<Vec<Morpheme>, TokenizeError> {
        let mut tokens = self
            .inner
            .tokenize(sentence)
            .map_err(|e| TokenizeError(format!("Failed to segment text: {e}")))?;

        let mut morphemes = Vec::with_capacity(tokens.len());
        for token in tokens.iter_mut() {
            let surface = token.surface.to_string();
            let details = token.details();

            // unknown words carry no base form; fall back to the surface
            let lemma = match details.get(BASE_FORM_DETAIL) {
                Some(base) if !base.is_empty() && *base != "*" => base.to_string(),
                _ => surface.clone(),
            };

            morphemes.push(Morpheme { surface, lemma });
        }

        Ok(morphemes)
    }

    fn name(&self) -> &'static str {
        "lindera"
    }
}
