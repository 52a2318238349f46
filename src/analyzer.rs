//! End-to-end page analysis

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::advice::generate_actionable_advice;
use crate::aio::{evaluate_aio, fit_only_aio_result, AioOracle, AioRequest, AioResult};
use crate::classify::detect_industry;
use crate::corpus::INDUSTRY_CONTENTS;
use crate::error::Result;
use crate::fetch;
use crate::industry::{IndustryAnalysis, IndustryDetector};
use crate::integrate::{determine_final_industry, integrate_results, FinalIndustry, IntegratedResult};
use crate::page_facts::PageFacts;
use crate::personalization::calculate_personalization_score;
use crate::seo::{analyze_seo, SeoReport};

/// Everything known about one analyzed page
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub url: String,
    pub analyzed_at: DateTime<Utc>,
    pub user_industry: Option<String>,
    /// AIO weight in percent
    pub balance: u8,
    pub title: String,
    /// Most frequent content words with counts
    pub top_keywords: Vec<(String, usize)>,
    pub tech_stack: Vec<String>,
    pub industry_analysis: IndustryAnalysis,
    pub final_industry: FinalIndustry,
    /// Content-profile key from the lightweight classifier
    pub content_profile: String,
    pub content_profile_name: String,
    pub fit_score: f64,
    pub missing_keywords: Vec<String>,
    pub advice: String,
    pub seo: SeoReport,
    pub aio: AioResult,
    pub integrated: IntegratedResult,
}

/// Runs the analysis pipeline, optionally consulting an AIO oracle
pub struct Analyzer {
    detector: IndustryDetector,
    oracle: Option<Box<dyn AioOracle>>,
}

impl Analyzer {
    pub fn new(oracle: Option<Box<dyn AioOracle>>) -> Self {
        Self {
            detector: IndustryDetector::new(),
            oracle,
        }
    }

    /// Analyzer that scores AIO from content fit only
    pub fn offline() -> Self {
        Self::new(None)
    }

    /// Fetch a page and analyze it
    pub fn analyze_url(&self, url: &str, user_industry: Option<&str>, balance: u8) -> Result<AnalysisReport> {
        let page = fetch::fetch(url)?;
        Ok(self.analyze_html(&page.url, &page.html, user_industry, balance))
    }

    /// Analyze already-fetched HTML
    pub fn analyze_html(&self, url: &str, html: &str, user_industry: Option<&str>, balance: u8) -> AnalysisReport {
        let facts = PageFacts::from_html(url, html);
        let content = facts.main_content.as_str();

        let industry_analysis = self
            .detector
            .analyze_industries(&facts.title, content, &facts.meta_description);
        let final_industry = determine_final_industry(user_industry, &industry_analysis);

        let profile_key = detect_industry(content);
        let (fit_score, missing_keywords) = calculate_personalization_score(content, profile_key, &INDUSTRY_CONTENTS);
        let advice = generate_actionable_advice(&missing_keywords, profile_key);
        let content_profile_name = INDUSTRY_CONTENTS
            .get(profile_key)
            .map(|p| p.display_name.clone())
            .unwrap_or_default();

        tracing::info!(
            %url,
            industry = %final_industry.primary,
            profile = profile_key,
            fit_score,
            "classified page"
        );

        let seo = analyze_seo(&facts);

        let aio = match &self.oracle {
            Some(oracle) => {
                let request = AioRequest {
                    url,
                    title: &facts.title,
                    final_industry: &final_industry,
                    analysis: &industry_analysis,
                    content,
                };
                evaluate_aio(oracle.as_ref(), &request)
            }
            None => fit_only_aio_result(fit_score),
        };

        let balance = balance.min(100);
        let integrated = integrate_results(&seo, &aio, balance);

        tracing::info!(
            seo = seo.total_score,
            aio = aio.total_score,
            integrated = integrated.integrated_score,
            "scored page"
        );

        AnalysisReport {
            url: url.to_string(),
            analyzed_at: Utc::now(),
            user_industry: user_industry.map(str::to_string),
            balance,
            title: facts.title.clone(),
            top_keywords: facts.top_keywords.clone(),
            tech_stack: facts.tech_stack.clone(),
            industry_analysis,
            final_industry,
            content_profile: profile_key.to_string(),
            content_profile_name,
            fit_score,
            missing_keywords,
            advice,
            seo,
            aio,
            integrated,
        }
    }
}
