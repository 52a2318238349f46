//! Lightweight classifier mapping page text to a content-profile key
//!
//! Coarser than [`crate::industry`] and deliberately independent of it: the
//! two may disagree about the same page.

use crate::corpus::{CLASSIFIER_SIGNALS, UNKNOWN_KEY};
use crate::industry::count_occurrences;

/// Classify text into a content-profile key, or [`UNKNOWN_KEY`]
pub fn detect_industry(text: &str) -> &'static str {
    if text.trim().is_empty() {
        return UNKNOWN_KEY;
    }

    let lowered = text.to_lowercase();
    let mut best: Option<(&'static str, u32)> = None;

    for (key, signals) in CLASSIFIER_SIGNALS {
        let hits: u32 = signals
            .iter()
            .map(|s| count_occurrences(&lowered, &s.to_lowercase()))
            .sum();

        // strictly greater keeps the earlier key on ties
        if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
            best = Some((key, hits));
        }
    }

    best.map(|(key, _)| key).unwrap_or(UNKNOWN_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::INDUSTRY_CONTENTS;

    #[test]
    fn test_real_estate() {
        let key = detect_industry("マンションや戸建ての売買をサポートする不動産会社です");
        assert_eq!(key, "real_estate");
    }

    #[test]
    fn test_restaurant() {
        assert_eq!(detect_industry("本日のランチメニューとディナーコース"), "restaurant");
    }

    #[test]
    fn test_clinic() {
        assert_eq!(detect_industry("内科・小児科のクリニックです。診療時間は9時から"), "clinic");
    }

    #[test]
    fn test_construction() {
        assert_eq!(detect_industry("外壁塗装とリフォーム工事の工務店"), "construction");
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(detect_industry(""), UNKNOWN_KEY);
        assert_eq!(detect_industry("   \n\t "), UNKNOWN_KEY);
    }

    #[test]
    fn test_no_signal() {
        assert_eq!(detect_industry("The quick brown fox"), UNKNOWN_KEY);
    }

    #[test]
    fn test_tie_keeps_first_key() {
        // one restaurant signal, one real estate signal
        assert_eq!(detect_industry("カフェ 土地"), "restaurant");
    }

    #[test]
    fn test_result_always_in_content_corpus() {
        for text in ["", "カフェ", "病院", "土木", "nothing"] {
            assert!(INDUSTRY_CONTENTS.contains_key(detect_industry(text)));
        }
    }
}
