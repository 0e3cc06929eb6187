use std::fmt::Write;

use kaiseki_lang_japanese::Analysis;

const LABEL_WIDTH: usize = 24;
const VALUE_WIDTH: usize = 10;

/// Fixed-order statistics table
pub fn render(analysis: &Analysis) -> String {
    let doc = &analysis.document;
    let derived = &analysis.derived;

    let rows = [
        ("Character count", thousands(doc.char_count)),
        ("Word count", thousands(doc.vocab_count)),
        ("Kanji count", thousands(doc.kanji_count)),
        ("Sentence count", thousands(doc.sentence_count)),
        ("Unique words", thousands(derived.unique_vocab as u64)),
        ("Unique words used once", thousands(derived.unique_vocab_once as u64)),
        ("Unique kanji", thousands(derived.unique_kanji as u64)),
        ("Unique kanji used once", thousands(derived.unique_kanji_once as u64)),
        ("Top 90% kanji frequency", thousands(u64::from(derived.p90_kanji_freq))),
        ("Average sentence length", decimal(derived.avg_sentence_len)),
        ("Kanji density", percent(derived.kanji_density)),
        ("Difficulty", format!("{:.1}", derived.difficulty)),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<LABEL_WIDTH$} {value:>VALUE_WIDTH$}");
    }
    out
}

/// 1234567 -> "1,234,567"
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One decimal place with a grouped integer part
pub fn decimal(value: f64) -> String {
    let tenths = (value * 10.0).round() as u64;
    format!("{}.{}", thousands(tenths / 10), tenths % 10)
}

/// Ratio as a whole percentage
pub fn percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}
