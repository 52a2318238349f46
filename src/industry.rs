//! Industry Detection - Weighted keyword scoring over the detector corpus
//!
//! Every industry is scored against the combined page text. Keyword tiers
//! carry different weights (primary 3, secondary 2, specialized 5) and each
//! occurrence counts. The highest-scoring industry becomes the primary one,
//! close runners-up are reported as secondary industries.

use serde::{Deserialize, Serialize};

use crate::corpus::{
    IndustryKeywordProfile, AUDIENCE_PATTERNS, INDUSTRY_PROFILES, REGULATORY_TERMS,
};

/// Primary industry reported when no keyword matched anywhere
pub const UNDETERMINED_INDUSTRY: &str = "指定なし（自動判定不可）";

const PRIMARY_WEIGHT: u32 = 3;
const SECONDARY_WEIGHT: u32 = 2;
const SPECIALIZED_WEIGHT: u32 = 5;

/// Runners-up must reach this share of the primary score
const SECONDARY_THRESHOLD: f64 = 0.3;

/// How many runners-up are considered for the secondary list
const MAX_SECONDARY: usize = 5;

/// Result of one industry analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryAnalysis {
    pub primary_industry: String,
    /// Runners-up formatted as "name(score)"
    pub secondary_industries: Vec<String>,
    /// Keyword density of the primary industry (0 - 100)
    pub confidence_score: f64,
    /// Matched keywords of the primary industry, all tiers
    pub industry_keywords: Vec<String>,
    /// Same contents as `industry_keywords`, kept under its own name for reports
    pub specialized_terms: Vec<String>,
    pub regulatory_indicators: Vec<String>,
    pub target_audience_clues: Vec<String>,
}

impl IndustryAnalysis {
    /// Analysis returned when the text matches no industry at all
    pub fn undetermined() -> Self {
        Self {
            primary_industry: UNDETERMINED_INDUSTRY.to_string(),
            secondary_industries: Vec::new(),
            confidence_score: 0.0,
            industry_keywords: Vec::new(),
            specialized_terms: Vec::new(),
            regulatory_indicators: Vec::new(),
            target_audience_clues: Vec::new(),
        }
    }

    /// Whether a primary industry could be determined
    pub fn is_determined(&self) -> bool {
        self.primary_industry != UNDETERMINED_INDUSTRY
    }
}

/// Raw score of one industry against a text
#[derive(Debug, Clone, PartialEq)]
pub struct IndustryScore {
    pub industry: &'static str,
    pub score: u32,
    pub matched: Vec<String>,
}

/// Industry detector over a keyword corpus
#[derive(Debug, Clone, Copy)]
pub struct IndustryDetector {
    profiles: &'static [IndustryKeywordProfile],
}

impl Default for IndustryDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl IndustryDetector {
    /// Detector over the built-in corpus
    pub fn new() -> Self {
        Self {
            profiles: INDUSTRY_PROFILES,
        }
    }

    /// Score every industry and rank them, highest first.
    ///
    /// The sort is stable, so equal scores keep corpus order.
    pub fn rank(&self, text: &str) -> Vec<IndustryScore> {
        let lowered = text.to_lowercase();
        let mut scores: Vec<IndustryScore> = self
            .profiles
            .iter()
            .map(|profile| score_industry(&lowered, profile))
            .collect();

        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores
    }

    /// Analyze which industries a page belongs to
    pub fn analyze_industries(
        &self,
        title: &str,
        content: &str,
        meta_description: &str,
    ) -> IndustryAnalysis {
        let combined = format!("{} {} {}", title, meta_description, content).to_lowercase();
        let ranked = self.rank(&combined);

        let Some(top) = ranked.first().filter(|top| top.score > 0) else {
            return IndustryAnalysis::undetermined();
        };

        tracing::debug!(
            scores = ?ranked.iter().map(|s| (s.industry, s.score)).collect::<Vec<_>>(),
            "ranked industries"
        );

        let primary_score = f64::from(top.score);
        let threshold = primary_score * SECONDARY_THRESHOLD;
        let secondary_industries = ranked
            .iter()
            .skip(1)
            .take(MAX_SECONDARY)
            .filter(|s| s.score > 0 && f64::from(s.score) >= threshold)
            .map(|s| format!("{}({})", s.industry, s.score))
            .collect();

        let total_words = combined.split_whitespace().count() as f64;
        let confidence = (primary_score / (total_words * 0.1).max(1.0) * 100.0).min(100.0);

        IndustryAnalysis {
            primary_industry: top.industry.to_string(),
            secondary_industries,
            confidence_score: confidence,
            industry_keywords: top.matched.clone(),
            specialized_terms: top.matched.clone(),
            regulatory_indicators: detect_regulatory_terms(&combined),
            target_audience_clues: detect_target_audience(&combined),
        }
    }
}

/// Analyze a page against the built-in detector corpus
pub fn analyze_industries(title: &str, content: &str, meta_description: &str) -> IndustryAnalysis {
    IndustryDetector::new().analyze_industries(title, content, meta_description)
}

/// Score one industry against already-lowercased text
fn score_industry(lowered: &str, profile: &IndustryKeywordProfile) -> IndustryScore {
    let mut score = 0;
    let mut matched: Vec<String> = Vec::new();

    let tiers = [
        (profile.primary, PRIMARY_WEIGHT),
        (profile.secondary, SECONDARY_WEIGHT),
        (profile.specialized, SPECIALIZED_WEIGHT),
    ];

    for (keywords, weight) in tiers {
        for keyword in keywords {
            let count = count_occurrences(lowered, &keyword.to_lowercase());
            score += count * weight;
            if count > 0 && !matched.iter().any(|m| m == keyword) {
                matched.push(keyword.to_string());
            }
        }
    }

    IndustryScore {
        industry: profile.name,
        score,
        matched,
    }
}

/// Count non-overlapping occurrences of `needle` in `haystack`
pub(crate) fn count_occurrences(haystack: &str, needle: &str) -> u32 {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count() as u32
}

/// Audience categories whose patterns occur verbatim in the text
fn detect_target_audience(text: &str) -> Vec<String> {
    AUDIENCE_PATTERNS
        .iter()
        .filter(|(_, patterns)| patterns.iter().any(|p| text.contains(p)))
        .map(|(label, _)| label.to_string())
        .collect()
}

/// Regulatory terms mentioned in the (lowercased) text
fn detect_regulatory_terms(text: &str) -> Vec<String> {
    REGULATORY_TERMS
        .iter()
        .filter(|term| text.contains(&term.to_lowercase()))
        .map(|term| term.to_string())
        .collect()
}
