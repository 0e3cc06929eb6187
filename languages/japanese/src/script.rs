//! Character classes for the retained Japanese scripts.

/// Hiragana block, U+3040..U+309F
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Katakana block, U+30A0..U+30FF (includes the prolonged sound mark)
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

/// CJK Unified Ideographs, U+4E00..U+9FFF
pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

pub fn is_japanese(c: char) -> bool {
    is_hiragana(c) || is_katakana(c) || is_kanji(c)
}

/// Keep only hiragana, katakana and kanji
pub fn filter_japanese(text: &str) -> String {
    text.chars().filter(|c| is_japanese(*c)).collect()
}
