//! Final industry decision and SEO/AIO blending

use serde::{Deserialize, Serialize};

use crate::aio::AioResult;
use crate::industry::IndustryAnalysis;
use crate::seo::SeoReport;

/// Primary label used when neither the user nor the detector settles the industry
pub const UNSPECIFIED_INDUSTRY: &str = "指定なし";

/// Balance (AIO share in percent) used when none is configured
pub const DEFAULT_BALANCE: u8 = 50;

/// Industry the rest of the analysis is framed around
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalIndustry {
    pub primary: String,
    /// How the decision was reached, shown to the user
    pub source: String,
    pub confidence: f64,
    pub secondary_detected: Vec<String>,
}

/// Combine a user-supplied industry with the automatic analysis
pub fn determine_final_industry(user_industry: Option<&str>, analysis: &IndustryAnalysis) -> FinalIndustry {
    let auto_primary = &analysis.primary_industry;
    let auto_confidence = analysis.confidence_score;
    let user_industry = user_industry.map(str::trim).filter(|s| !s.is_empty());

    let (primary, source, confidence) = match user_industry {
        Some(user) if auto_confidence > 50.0 => {
            if auto_primary.to_lowercase().contains(&user.to_lowercase()) {
                (user.to_string(), "ユーザー入力（自動判定で確認済み）".to_string(), 95.0)
            } else {
                (user.to_string(), format!("ユーザー入力（自動判定: {}）", auto_primary), 85.0)
            }
        }
        Some(user) => (user.to_string(), "ユーザー入力".to_string(), 80.0),
        None if auto_confidence > 70.0 => (
            auto_primary.clone(),
            format!("自動判定（信頼度: {:.1}%）", auto_confidence),
            auto_confidence,
        ),
        None => (UNSPECIFIED_INDUSTRY.to_string(), "判定困難".to_string(), auto_confidence),
    };

    FinalIndustry {
        primary,
        source,
        confidence,
        secondary_detected: analysis.secondary_industries.clone(),
    }
}

/// Which side needs work first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Focus {
    Seo,
    Aio,
}

impl std::fmt::Display for Focus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Focus::Seo => write!(f, "SEO"),
            Focus::Aio => write!(f, "AIO"),
        }
    }
}

/// Suggested effort split, percentages summing to 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedBalance {
    pub seo_focus: u8,
    pub aio_focus: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegratedResult {
    pub integrated_score: f64,
    pub seo_score: f64,
    pub aio_score: f64,
    pub primary_focus: Focus,
    pub improvements: Vec<String>,
    pub recommended_balance: RecommendedBalance,
}

/// Blend SEO and AIO scores.
///
/// `balance` is the AIO weight in percent (0 = SEO only, 100 = AIO only).
/// The AIO total is taken as already normalized to 0 - 100.
pub fn integrate_results(seo: &SeoReport, aio: &AioResult, balance: u8) -> IntegratedResult {
    let balance = balance.min(100);
    let aio_weight = f64::from(balance) / 100.0;
    let seo_weight = 1.0 - aio_weight;

    let seo_score = seo.total_score;
    let aio_score = aio.total_score;
    let integrated_score = seo_score * seo_weight + aio_score * aio_weight;

    let primary_focus = if aio_score < seo_score { Focus::Aio } else { Focus::Seo };

    let mut improvements = Vec::new();
    match primary_focus {
        Focus::Aio => {
            improvements.extend(
                aio.immediate_actions
                    .iter()
                    .take(3)
                    .map(|a| format!("AIO優先: {}", a.action)),
            );
            if seo_score < 70.0 {
                improvements.push(format!(
                    "SEO補完: タイトル最適化（現在スコア: {:.1}/10）",
                    seo.scores.title_score
                ));
            }
        }
        Focus::Seo => {
            let mut weak: Vec<_> = seo
                .scores
                .entries()
                .into_iter()
                .filter(|(_, _, score)| *score < 7.0)
                .collect();
            weak.sort_by(|a, b| a.2.total_cmp(&b.2));

            for (_, label, score) in weak.into_iter().take(2) {
                improvements.push(format!("SEO優先: {}の改善（現在スコア: {:.1}/10）", label, score));
            }
            if let Some(action) = aio.immediate_actions.first() {
                improvements.push(format!("AIO補完: {}", action.action));
            }
        }
    }

    IntegratedResult {
        integrated_score,
        seo_score,
        aio_score,
        primary_focus,
        improvements,
        recommended_balance: recommend_balance(seo_score, aio_score),
    }
}

/// Put more effort where the gap to 100 is larger
fn recommend_balance(seo_score: f64, aio_score: f64) -> RecommendedBalance {
    let gap = (100.0 - seo_score) + (100.0 - aio_score);
    let seo_focus = if gap > 0.0 {
        ((100.0 - seo_score) / gap * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
    } else {
        50
    };

    RecommendedBalance {
        seo_focus,
        aio_focus: 100 - seo_focus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aio::ImmediateAction;
    use crate::seo::{GarbledFlags, SeoScores};

    fn analysis(primary: &str, confidence: f64) -> IndustryAnalysis {
        IndustryAnalysis {
            primary_industry: primary.to_string(),
            confidence_score: confidence,
            secondary_industries: vec!["金融".to_string()],
            ..IndustryAnalysis::undetermined()
        }
    }

    fn seo_report(scores: SeoScores) -> SeoReport {
        SeoReport {
            total_score: scores.total(),
            scores,
            title_length: 0,
            meta_description_length: 0,
            internal_links_count: 0,
            external_links_count: 0,
            garbled: GarbledFlags::default(),
        }
    }

    fn uniform_scores(value: f64) -> SeoScores {
        SeoScores {
            title_score: value,
            meta_description_score: value,
            headings_score: value,
            content_score: value,
            links_score: value,
            images_score: value,
            technical_score: value,
        }
    }

    fn aio_with_actions(total: f64, actions: &[&str]) -> AioResult {
        AioResult {
            total_score: total,
            immediate_actions: actions
                .iter()
                .map(|a| ImmediateAction {
                    action: a.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_user_industry_confirmed_by_detector() {
        let result = determine_final_industry(Some("IT"), &analysis("IT・テクノロジー", 60.0));
        assert_eq!(result.primary, "IT");
        assert_eq!(result.source, "ユーザー入力（自動判定で確認済み）");
        assert_eq!(result.confidence, 95.0);
        assert_eq!(result.secondary_detected, vec!["金融"]);
    }

    #[test]
    fn test_user_industry_disagrees_with_detector() {
        let result = determine_final_industry(Some("飲食"), &analysis("医療・ヘルスケア", 80.0));
        assert_eq!(result.primary, "飲食");
        assert_eq!(result.source, "ユーザー入力（自動判定: 医療・ヘルスケア）");
        assert_eq!(result.confidence, 85.0);
    }

    #[test]
    fn test_user_industry_with_weak_detection() {
        let result = determine_final_industry(Some("建設"), &analysis("不動産", 30.0));
        assert_eq!(result.source, "ユーザー入力");
        assert_eq!(result.confidence, 80.0);
    }

    #[test]
    fn test_auto_detection_only() {
        let result = determine_final_industry(None, &analysis("金融", 75.5));
        assert_eq!(result.primary, "金融");
        assert_eq!(result.source, "自動判定（信頼度: 75.5%）");

        let result = determine_final_industry(Some("  "), &analysis("金融", 40.0));
        assert_eq!(result.primary, UNSPECIFIED_INDUSTRY);
        assert_eq!(result.source, "判定困難");
        assert_eq!(result.confidence, 40.0);
    }

    #[test]
    fn test_weights_follow_balance() {
        let seo = seo_report(uniform_scores(8.0));
        let aio = aio_with_actions(40.0, &[]);

        let result = integrate_results(&seo, &aio, 0);
        assert!((result.integrated_score - 80.0).abs() < 1e-9);

        let result = integrate_results(&seo, &aio, 100);
        assert!((result.integrated_score - 40.0).abs() < 1e-9);

        let result = integrate_results(&seo, &aio, 50);
        assert!((result.integrated_score - 60.0).abs() < 1e-9);

        // out-of-range balance acts as AIO only
        let result = integrate_results(&seo, &aio, 250);
        assert!((result.integrated_score - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_aio_behind_seo() {
        let seo = seo_report(uniform_scores(6.0));
        let aio = aio_with_actions(40.0, &["FAQ追加", "著者情報", "構造化データ", "事例追加"]);
        let result = integrate_results(&seo, &aio, 50);

        assert_eq!(result.primary_focus, Focus::Aio);
        assert!((result.aio_score - 40.0).abs() < 1e-9);
        assert_eq!(
            result.improvements,
            vec![
                "AIO優先: FAQ追加",
                "AIO優先: 著者情報",
                "AIO優先: 構造化データ",
                "SEO補完: タイトル最適化（現在スコア: 6.0/10）",
            ]
        );
    }

    #[test]
    fn test_seo_behind_aio() {
        let mut scores = uniform_scores(9.0);
        scores.images_score = 2.0;
        scores.links_score = 5.0;
        scores.technical_score = 6.0;
        let seo = seo_report(scores);
        let aio = aio_with_actions(95.0, &["引用元の明示"]);
        let result = integrate_results(&seo, &aio, 50);

        assert_eq!(result.primary_focus, Focus::Seo);
        assert_eq!(
            result.improvements,
            vec![
                "SEO優先: 画像の改善（現在スコア: 2.0/10）",
                "SEO優先: リンクの改善（現在スコア: 5.0/10）",
                "AIO補完: 引用元の明示",
            ]
        );
    }

    #[test]
    fn test_recommended_balance() {
        let seo = seo_report(uniform_scores(8.0));
        let aio = aio_with_actions(40.0, &[]);
        let balance = integrate_results(&seo, &aio, 50).recommended_balance;
        // gaps 20 and 60
        assert_eq!(balance, RecommendedBalance { seo_focus: 25, aio_focus: 75 });

        let perfect = seo_report(uniform_scores(10.0));
        let balance = integrate_results(&perfect, &aio_with_actions(100.0, &[]), 50).recommended_balance;
        assert_eq!(balance, RecommendedBalance { seo_focus: 50, aio_focus: 50 });
    }

    #[test]
    fn test_focus_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Focus::Aio).unwrap(), "\"AIO\"");
        assert_eq!(Focus::Seo.to_string(), "SEO");
    }
}
