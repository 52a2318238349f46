//! Behavior of the industry engine: detector, classifier, fit scorer and advice

use seoaio::advice::{generate_actionable_advice, NOTHING_MISSING_ADVICE, UNCLASSIFIED_ADVICE};
use seoaio::classify::detect_industry;
use seoaio::corpus::{ContentCorpus, ContentProfile, INDUSTRY_CONTENTS, UNKNOWN_KEY};
use seoaio::industry::{analyze_industries, IndustryDetector};
use seoaio::personalization::calculate_personalization_score;

// ============================================================================
// Detector
// ============================================================================

#[test]
fn cloud_service_page_is_it() {
    let analysis = analyze_industries(
        "最新のAIを活用したクラウドサービス",
        "AWSとDockerで構築した基盤を提供します",
        "",
    );

    assert_eq!(analysis.primary_industry, "IT・テクノロジー");
    assert!(analysis.confidence_score > 0.0);
    assert!(analysis.industry_keywords.contains(&"クラウド".to_string()));
    assert_eq!(analysis.specialized_terms, analysis.industry_keywords);
}

#[test]
fn no_matches_means_zero_confidence() {
    let analysis = analyze_industries("hello", "nothing relevant here", "");

    assert!(!analysis.is_determined());
    assert_eq!(analysis.confidence_score, 0.0);
    assert!(analysis.secondary_industries.is_empty());
    assert!(analysis.industry_keywords.is_empty());
}

#[test]
fn blank_input_is_undetermined() {
    let analysis = analyze_industries("", "   ", "");
    assert!(!analysis.is_determined());
    assert_eq!(analysis.confidence_score, 0.0);
}

#[test]
fn extra_primary_keyword_never_lowers_score() {
    let detector = IndustryDetector::new();
    let base = "病院の紹介ページ 物件 賃貸";
    let more = format!("{} 病院", base);

    let score_of = |text: &str| {
        detector
            .rank(&text.to_lowercase())
            .into_iter()
            .find(|s| s.industry == "医療・ヘルスケア")
            .map(|s| s.score)
            .unwrap_or(0)
    };

    assert!(score_of(&more) >= score_of(base));
}

#[test]
fn meta_description_counts_toward_detection() {
    let analysis = analyze_industries("会社案内", "", "宅建士が在籍する不動産投資のご相談");
    assert_eq!(analysis.primary_industry, "不動産");
}

// ============================================================================
// Classifier and fit scoring
// ============================================================================

#[test]
fn real_estate_text_classifies_as_real_estate() {
    assert_eq!(detect_industry("マンションや戸建ての売買をサポートする不動産会社です"), "real_estate");
}

#[test]
fn empty_text_is_unknown() {
    assert_eq!(detect_industry(""), UNKNOWN_KEY);
    assert_eq!(detect_industry(" \n\t"), UNKNOWN_KEY);
}

#[test]
fn classifier_and_detector_may_disagree() {
    // the detector knows consulting, the content corpus does not
    let text = "経営コンサルティングと戦略立案、業務改善の支援。ランチミーティングも歓迎";
    let analysis = analyze_industries("", text, "");

    assert_eq!(analysis.primary_industry, "コンサルティング");
    assert_eq!(detect_industry(text), "restaurant");
}

#[test]
fn restaurant_page_fit() {
    let text = "当店のメニューをご確認いただき、予約も簡単にできます。アクセスも便利です。";
    let (score, missing) = calculate_personalization_score(text, "restaurant", &INDUSTRY_CONTENTS);

    assert!(score > 40.0);
    assert!(missing.contains(&"地図".to_string()));
}

#[test]
fn full_checklist_scores_100() {
    for profile in INDUSTRY_CONTENTS.iter().filter(|p| !p.keywords.is_empty()) {
        let text = profile.keywords.join("、");
        let (score, missing) = calculate_personalization_score(&text, &profile.key, &INDUSTRY_CONTENTS);
        assert_eq!(score, 100.0, "profile {}", profile.key);
        assert!(missing.is_empty());
    }
}

#[test]
fn custom_corpus_and_empty_profile() {
    let corpus = ContentCorpus::new(vec![
        ContentProfile::new("salon", "美容室", &["カット", "カラー"]),
        ContentProfile::new("empty", "空", &[]),
    ]);

    assert_eq!(calculate_personalization_score("カットのみ", "salon", &corpus), (50.0, vec!["カラー".to_string()]));
    assert_eq!(calculate_personalization_score("カット", "empty", &corpus), (0.0, vec![]));
    assert_eq!(calculate_personalization_score("カット", "restaurant", &corpus), (0.0, vec![]));
}

#[test]
fn scores_stay_in_range() {
    let samples = [
        "",
        "メニュー",
        "メニュー 予約 アクセス 営業時間 地図 価格 メニュー メニュー",
        "completely unrelated english text",
    ];
    for text in samples {
        for key in INDUSTRY_CONTENTS.keys() {
            let (score, _) = calculate_personalization_score(text, key, &INDUSTRY_CONTENTS);
            assert!((0.0..=100.0).contains(&score));
        }
    }
}

// ============================================================================
// Advice
// ============================================================================

#[test]
fn nothing_missing_is_fixed_message() {
    for key in ["restaurant", "clinic", UNKNOWN_KEY, "no-such-key"] {
        assert_eq!(generate_actionable_advice(&[], key), NOTHING_MISSING_ADVICE);
    }
}

#[test]
fn unknown_profile_never_names_an_industry() {
    let missing = vec!["地図".to_string(), "価格".to_string()];

    for key in [UNKNOWN_KEY, "no-such-key"] {
        let advice = generate_actionable_advice(&missing, key);
        assert_eq!(advice, UNCLASSIFIED_ADVICE);
        for profile in INDUSTRY_CONTENTS.iter() {
            assert!(!advice.contains(&profile.display_name), "mentions {}", profile.display_name);
        }
    }
}

#[test]
fn end_to_end_restaurant_advice() {
    let text = "当店のメニューをご確認いただき、予約も簡単にできます。アクセスも便利です。";
    let key = detect_industry(text);
    let (_, missing) = calculate_personalization_score(text, key, &INDUSTRY_CONTENTS);
    let advice = generate_actionable_advice(&missing, key);

    assert_eq!(advice, "飲食店向けに『営業時間、地図、価格』に関する情報を追加すると効果的です。");
}
