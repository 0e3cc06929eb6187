use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

use crate::script::filter_japanese;

lazy_static! {
    /// Pronunciation gloss delimited by double angle brackets, e.g. 漢字《かんじ》
    static ref FURIGANA: Regex = Regex::new(r"《[^》\n]*》").unwrap();
    /// Sentence terminals, quotation brackets and newlines; runs collapse to one split
    static ref SENTENCE_BREAK: Regex = Regex::new(r"[。！？「」『』«»〔〕\n]+").unwrap();
}

/// Splits extracted document text into cleaned Japanese-only sentences
///
/// Glosses are stripped once up front. [`SentenceSegmenter::sentences`]
/// can be called any number of times and always yields the same sequence.
pub struct SentenceSegmenter<'a> {
    text: Cow<'a, str>,
}

impl<'a> SentenceSegmenter<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text: remove_furigana(text),
        }
    }

    /// Non-empty sentences with everything but kana and kanji dropped
    pub fn sentences(&self) -> impl Iterator<Item = String> + '_ {
        SENTENCE_BREAK
            .split(&self.text)
            .map(filter_japanese)
            .filter(|sentence| !sentence.is_empty())
    }
}

/// Remove `《…》` glosses together with their brackets
pub fn remove_furigana(text: &str) -> Cow<'_, str> {
    FURIGANA.replace_all(text, "")
}
