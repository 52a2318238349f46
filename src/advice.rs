//! Natural-language advice from missing checklist keywords

use crate::corpus::{INDUSTRY_CONTENTS, UNKNOWN_KEY};

/// Returned when no checklist keyword is missing
pub const NOTHING_MISSING_ADVICE: &str = "特に不足している重要キーワードは見当たりません。";

/// Generic advice when the page could not be tied to a content profile
pub const UNCLASSIFIED_ADVICE: &str = "業種を特定できませんでした。事業内容・提供サービス・会社情報など、\
ページの基本的な説明を充実させると、業種の判定と評価がしやすくなります。";

/// Turn missing keywords into a recommendation for the given profile key
pub fn generate_actionable_advice(missing_keywords: &[String], profile_key: &str) -> String {
    if missing_keywords.is_empty() {
        return NOTHING_MISSING_ADVICE.to_string();
    }

    match INDUSTRY_CONTENTS
        .get(profile_key)
        .filter(|p| p.key != UNKNOWN_KEY)
    {
        Some(profile) => format!(
            "{}向けに『{}』に関する情報を追加すると効果的です。",
            profile.display_name,
            missing_keywords.join("、")
        ),
        None => UNCLASSIFIED_ADVICE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_known_profile() {
        let advice = generate_actionable_advice(&kw(&["予約", "地図"]), "restaurant");
        assert!(advice.contains("飲食店"));
        assert!(advice.contains("予約、地図"));
    }

    #[test]
    fn test_unknown_profile() {
        let advice = generate_actionable_advice(&kw(&["予約"]), "unknown");
        assert!(advice.contains("業種を特定できませんでした"));
        assert!(!advice.contains("飲食店"));
    }

    #[test]
    fn test_unknown_never_names_an_industry() {
        for key in ["unknown", "spaceport", ""] {
            let advice = generate_actionable_advice(&kw(&["a", "b"]), key);
            for profile in INDUSTRY_CONTENTS.iter() {
                assert!(!advice.contains(&profile.display_name), "{} in {}", profile.display_name, advice);
            }
        }
    }

    #[test]
    fn test_nothing_missing() {
        for key in ["restaurant", "unknown", "whatever"] {
            assert_eq!(generate_actionable_advice(&[], key), NOTHING_MISSING_ADVICE);
        }
    }
}
