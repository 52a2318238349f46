use once_cell::sync::Lazy;
use regex::Regex;

// Pre-compiled regex for whitespace normalization (compile once, use many times)
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace regex pattern")
});

/// Byte sequences that only show up when UTF-8 was decoded as Latin-1
const MOJIBAKE_MARKERS: [&str; 3] = ["Ã", "Â", "\u{FFFD}"];

/// Share of expected characters below which text counts as garbled
const MIN_VALID_RATIO: f64 = 0.7;

/// Heuristic check for garbled Japanese text.
///
/// Flags text with typical mis-decoding markers, or text where fewer than
/// 70% of characters are printable ASCII, kana/CJK punctuation or CJK
/// ideographs.
pub fn detect_mojibake(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    if MOJIBAKE_MARKERS.iter().any(|m| text.contains(m)) {
        return true;
    }

    let total = text.chars().count();
    let valid = text.chars().filter(|c| is_expected_char(*c)).count();
    (valid as f64 / total as f64) < MIN_VALID_RATIO
}

fn is_expected_char(c: char) -> bool {
    matches!(c, '\u{0020}'..='\u{007E}' | '\u{3000}'..='\u{30FF}' | '\u{4E00}'..='\u{9FFF}')
}

/// Collapse runs of whitespace into single spaces and trim
pub fn normalize_whitespace(content: &str) -> String {
    WHITESPACE_RE.replace_all(content, " ").trim().to_string()
}

/// Truncate to at most `max_chars` characters without splitting a char
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
