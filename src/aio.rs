//! AIO (generative-AI search optimization) evaluation
//!
//! The qualitative part of the AIO score comes from an external language
//! model, treated as an oracle that answers with a fixed JSON schema. This
//! module builds the request, talks to the oracle through the [`AioOracle`]
//! trait, and normalizes whatever comes back into an [`AioResult`]. Oracle
//! failures never abort an analysis; they turn into [`fallback_aio_result`].

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::classify::detect_industry;
use crate::corpus::INDUSTRY_CONTENTS;
use crate::error::{Result, SeoAioError};
use crate::industry::IndustryAnalysis;
use crate::integrate::FinalIndustry;
use crate::personalization::calculate_personalization_score;
use crate::text::truncate_chars;

/// AIO score categories (key, label), in report order
pub const AIO_CATEGORIES: &[(&str, &str)] = &[
    ("experience", "経験 (Experience)"),
    ("expertise", "専門性 (Expertise)"),
    ("authoritativeness", "権威性 (Authoritativeness)"),
    ("trustworthiness", "信頼性 (Trustworthiness)"),
    ("structure", "構造化と整理"),
    ("qa_compatibility", "質問応答適合性"),
    ("citation_potential", "AIによる引用可能性"),
    ("multimodal", "マルチモーダル対応"),
    ("search_intent", "検索意図マッチング"),
    ("personalization", "パーソナライズ可能性"),
    ("uniqueness", "情報の独自性"),
    ("completeness", "コンテンツの完全性"),
    ("readability", "読みやすさスコア"),
    ("mobile_friendly", "モバイル対応性"),
    ("page_speed", "ページ速度"),
    ("metadata", "メタデータ最適化"),
];

/// Category groups the oracle reports on
pub const CATEGORY_GROUPS: &[&str] = &["eeat_score", "ai_search_score", "user_experience_score", "technical_score"];

/// Breakdown label of the industry-fit component
pub const INDUSTRY_FIT_LABEL: &str = "業種適合性";

/// Page content sent to the oracle is cut at this many characters
const MAX_CONTENT_CHARS: usize = 7000;

const MISSING_SCORE_ADVICE: &str = "APIからのデータなし";

const SYSTEM_PROMPT: &str = "あなたはSEOとAIO（生成AI検索最適化）の専門家です。回答は指示されたスキーマの有効なJSONオブジェクトのみで返してください。JSON以外のテキストは含めないでください。";

/// Score and advice for one AIO category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub key: String,
    pub label: String,
    /// 0 - 10
    pub score: f64,
    pub advice: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImmediateAction {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub expected_impact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediumTermStrategy {
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub expected_outcome: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveAdvantage {
    #[serde(default)]
    pub advantage: String,
    #[serde(default)]
    pub implementation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketTrendStrategy {
    #[serde(default)]
    pub trend: String,
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub priority: String,
}

/// Oracle's free-text industry assessment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OracleIndustryNotes {
    #[serde(default)]
    pub industry_fit: String,
    #[serde(default)]
    pub specialized_improvements: String,
    #[serde(default)]
    pub compliance_check: String,
    #[serde(default)]
    pub market_trends: String,
}

/// Normalized AIO evaluation of one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AioResult {
    /// One entry per [`AIO_CATEGORIES`] item when the oracle ran
    pub scores: Vec<CategoryScore>,
    /// Group scores, 0 - 100
    pub category_scores: BTreeMap<String, f64>,
    /// 0 - 100
    pub total_score: f64,
    pub immediate_actions: Vec<ImmediateAction>,
    pub medium_term_strategies: Vec<MediumTermStrategy>,
    pub competitive_advantages: Vec<CompetitiveAdvantage>,
    pub market_trend_strategies: Vec<MarketTrendStrategy>,
    pub industry_notes: OracleIndustryNotes,
    /// Set when the oracle failed and this is the fallback result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything the oracle gets to see about a page
pub struct AioRequest<'a> {
    pub url: &'a str,
    pub title: &'a str,
    pub final_industry: &'a FinalIndustry,
    pub analysis: &'a IndustryAnalysis,
    pub content: &'a str,
}

/// External evaluator answering with the AIO JSON schema
pub trait AioOracle {
    /// Evaluate a page, returning the oracle's raw JSON object
    fn evaluate(&self, request: &AioRequest) -> Result<serde_json::Value>;
}

/// Oracle backed by the Claude CLI (`claude -p`)
#[derive(Debug, Clone)]
pub struct ClaudeCliOracle {
    pub command: String,
    pub model: Option<String>,
}

impl Default for ClaudeCliOracle {
    fn default() -> Self {
        Self {
            command: "claude".to_string(),
            model: None,
        }
    }
}

impl ClaudeCliOracle {
    pub fn new(command: &str, model: Option<String>) -> Self {
        Self {
            command: command.to_string(),
            model,
        }
    }

    /// Version string of the oracle command, if it is installed
    pub fn version(&self) -> Option<String> {
        Command::new(&self.command)
            .arg("--version")
            .output()
            .ok()
            .filter(|o| o.status.success())
            .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
    }
}

impl AioOracle for ClaudeCliOracle {
    fn evaluate(&self, request: &AioRequest) -> Result<serde_json::Value> {
        let workspace = std::env::temp_dir().join("seoaio-workspace");
        std::fs::create_dir_all(&workspace)?;

        let prompt = build_prompt(request);
        let mut command = Command::new(&self.command);
        command.current_dir(&workspace).args([
            "-p",
            "--output-format", "json",
            "--max-turns", "1",
            "--system-prompt", SYSTEM_PROMPT,
        ]);
        if let Some(model) = &self.model {
            command.args(["--model", model.as_str()]);
        }
        command.arg(&prompt);

        tracing::debug!(command = %self.command, prompt_chars = prompt.chars().count(), "calling oracle");

        let output = command.output().map_err(|e| match e.kind() {
            ErrorKind::NotFound => SeoAioError::OracleNotInstalled(self.command.clone()),
            _ => SeoAioError::IoError(e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SeoAioError::OracleFailed(stderr.trim().to_string()));
        }

        // Claude's JSON output wraps the actual answer in a "result" field
        let stdout = String::from_utf8_lossy(&output.stdout);
        let envelope: serde_json::Value = serde_json::from_str(&stdout)?;
        let result_text = envelope["result"]
            .as_str()
            .ok_or_else(|| SeoAioError::OracleFailed("No result in response".into()))?;

        tracing::debug!(response = %truncate_chars(result_text, 200), "oracle answered");

        parse_oracle_json(result_text)
    }
}

/// Build the evaluation prompt for a page
pub fn build_prompt(request: &AioRequest) -> String {
    let analysis = request.analysis;
    let industry = request.final_industry;

    let score_schema = AIO_CATEGORIES
        .iter()
        .map(|(key, _)| format!("    \"{}\": {{\"score\": 0, \"advice\": \"具体的で実践的なアドバイス\"}}", key))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        r#"以下のウェブページを、生成AI検索エンジン（ChatGPT Search、Claude、Gemini、Perplexity等）でのパフォーマンス向上の観点から分析してください。

## 分析対象
URL: {url}
タイトル: {title}

## 業界分析結果
主要業界: {primary} ({source})
信頼度: {confidence:.1}%
検出された副業界: {secondary}
専門用語: {terms}
ターゲット層: {audience}
規制要件: {regulatory}

## コンテンツ
{content}

## 評価項目（各10点満点）
- E-E-A-T（40%）: experience, expertise, authoritativeness, trustworthiness
- AI検索最適化（35%）: structure, qa_compatibility, citation_potential, multimodal
- ユーザー体験（25%）: search_intent, personalization, uniqueness, completeness
- 技術要素: readability, mobile_friendly, page_speed, metadata

{primary}業界の専門用語の使い方、最新トレンドの反映度、ターゲット適合性、差別化ポイント、資格・実績などの信頼性指標、規制対応も評価に含めてください。

## JSON出力形式
{{
  "scores": {{
{score_schema}
  }},
  "category_scores": {{"eeat_score": 0.0, "ai_search_score": 0.0, "user_experience_score": 0.0, "technical_score": 0.0}},
  "total_score": 0.0,
  "immediate_actions": [{{"action": "施策", "method": "具体的な実装方法", "expected_impact": "期待効果"}}],
  "medium_term_strategies": [{{"strategy": "戦略", "timeline": "実装期間", "expected_outcome": "期待成果"}}],
  "competitive_advantages": [{{"advantage": "差別化ポイント", "implementation": "具体的な実装方法"}}],
  "market_trend_strategies": [{{"trend": "トレンド", "strategy": "対応戦略", "priority": "優先度"}}],
  "industry_analysis": {{"industry_fit": "適合度評価", "specialized_improvements": "業界特化改善提案", "compliance_check": "規制対応状況", "market_trends": "市場トレンドと対応状況"}}
}}"#,
        url = request.url,
        title = request.title,
        primary = industry.primary,
        source = industry.source,
        confidence = industry.confidence,
        secondary = join_or(&industry.secondary_detected, 3, "なし"),
        terms = join_or(&analysis.specialized_terms, 5, "なし"),
        audience = join_or(&analysis.target_audience_clues, usize::MAX, "不明"),
        regulatory = join_or(&analysis.regulatory_indicators, usize::MAX, "なし"),
        content = truncate_chars(request.content, MAX_CONTENT_CHARS),
        score_schema = score_schema,
    )
}

fn join_or(items: &[String], limit: usize, empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.iter().take(limit).cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Parse the JSON object out of an oracle answer (code fences and chatter tolerated)
pub fn parse_oracle_json(text: &str) -> Result<serde_json::Value> {
    let stripped = strip_code_fencing(text);
    let (Some(start), Some(end)) = (stripped.find('{'), stripped.rfind('}')) else {
        return Err(SeoAioError::OracleFailed("No JSON object in oracle response".into()));
    };
    if start >= end {
        return Err(SeoAioError::OracleFailed("No JSON object in oracle response".into()));
    }

    serde_json::from_str(&stripped[start..=end])
        .map_err(|e| SeoAioError::OracleFailed(format!("Failed to parse oracle response: {}", e)))
}

/// Strip markdown code fencing from a string (e.g., ```json ... ```)
fn strip_code_fencing(s: &str) -> String {
    let trimmed = s.trim();

    if let Some(json_start) = trimmed.find("```json") {
        let after_fence = &trimmed[json_start + 7..];
        return match after_fence.find("```") {
            Some(end_fence) => after_fence[..end_fence].trim().to_string(),
            None => after_fence.trim().to_string(),
        };
    }

    if let Some(code_start) = trimmed.find("```") {
        let after_fence = &trimmed[code_start + 3..];
        return match after_fence.find("```") {
            Some(end_fence) => after_fence[..end_fence].trim().to_string(),
            None => after_fence.trim().to_string(),
        };
    }

    trimmed.to_string()
}

/// Normalize a raw oracle answer into an [`AioResult`].
///
/// Missing categories get score 0, totals and group scores are brought to
/// the 0 - 100 range, malformed lists become empty.
pub fn normalize_aio_response(raw: &serde_json::Value) -> AioResult {
    let scores = AIO_CATEGORIES
        .iter()
        .map(|(key, label)| {
            let entry = &raw["scores"][*key];
            let (score, advice) = if entry.is_object() {
                (
                    value_as_f64(&entry["score"]).unwrap_or(0.0),
                    entry["advice"].as_str().unwrap_or_default().to_string(),
                )
            } else {
                (0.0, MISSING_SCORE_ADVICE.to_string())
            };
            CategoryScore {
                key: key.to_string(),
                label: label.to_string(),
                score,
                advice,
            }
        })
        .collect();

    let category_scores = raw["category_scores"]
        .as_object()
        .map(|groups| {
            groups
                .iter()
                .map(|(name, value)| (name.clone(), value_as_f64(value).map(scale_to_100).unwrap_or(0.0)))
                .collect()
        })
        .unwrap_or_default();

    AioResult {
        scores,
        category_scores,
        total_score: value_as_f64(&raw["total_score"]).map(scale_to_100).unwrap_or(0.0),
        immediate_actions: list_field(raw, "immediate_actions"),
        medium_term_strategies: list_field(raw, "medium_term_strategies"),
        competitive_advantages: list_field(raw, "competitive_advantages"),
        market_trend_strategies: list_field(raw, "market_trend_strategies"),
        industry_notes: serde_json::from_value(raw["industry_analysis"].clone()).unwrap_or_default(),
        error: None,
    }
}

fn list_field<T: serde::de::DeserializeOwned>(raw: &serde_json::Value, field: &str) -> Vec<T> {
    serde_json::from_value(raw[field].clone()).unwrap_or_default()
}

/// Numbers and numeric strings as f64
fn value_as_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Result used when the oracle could not be consulted
pub fn fallback_aio_result(error: &str) -> AioResult {
    let advice = format!("APIエラーのため評価できません: {}", error);
    AioResult {
        scores: AIO_CATEGORIES
            .iter()
            .map(|(key, label)| CategoryScore {
                key: key.to_string(),
                label: label.to_string(),
                score: 1.0,
                advice: advice.clone(),
            })
            .collect(),
        category_scores: CATEGORY_GROUPS.iter().map(|g| (g.to_string(), 10.0)).collect(),
        total_score: 10.0,
        immediate_actions: vec![ImmediateAction {
            action: "AI評価コマンドの接続と設定を確認してください。".to_string(),
            method: "コマンドのインストール状況と認証設定の確認".to_string(),
            expected_impact: "分析機能の回復".to_string(),
        }],
        medium_term_strategies: vec![MediumTermStrategy {
            strategy: "AI評価の再実行".to_string(),
            timeline: "即座".to_string(),
            expected_outcome: "AIOスコアの取得".to_string(),
        }],
        error: Some(error.to_string()),
        ..Default::default()
    }
}

/// AIO result built from the industry-fit score alone (no oracle)
pub fn fit_only_aio_result(fit_score: f64) -> AioResult {
    AioResult {
        category_scores: BTreeMap::from([(INDUSTRY_FIT_LABEL.to_string(), fit_score)]),
        total_score: fit_score,
        ..Default::default()
    }
}

/// Ask the oracle, degrading to the fallback result on any error
pub fn evaluate_aio(oracle: &dyn AioOracle, request: &AioRequest) -> AioResult {
    match oracle.evaluate(request) {
        Ok(raw) => normalize_aio_response(&raw),
        Err(e) => {
            tracing::warn!(error = %e, "AIO oracle failed, using fallback scores");
            fallback_aio_result(&e.to_string())
        }
    }
}

/// Normalize a score to the 0 - 100 range.
///
/// Values in 0 - 10 are treated as ten-point scores, values above 100 are
/// capped, anything else passes through.
pub fn scale_to_100(value: f64) -> f64 {
    if (0.0..=10.0).contains(&value) {
        value * 10.0
    } else if value > 100.0 {
        100.0
    } else {
        value
    }
}

/// Text-only AIO score built from the industry-fit component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AioFitScore {
    pub total_score: f64,
    pub breakdown: BTreeMap<String, f64>,
    /// Content-profile key the text was classified under
    pub industry: String,
    pub missing_keywords: Vec<String>,
}

/// Classify text and score it against its content profile
pub fn calculate_aio_score(text: &str) -> AioFitScore {
    let industry = detect_industry(text);
    let (score, missing) = calculate_personalization_score(text, industry, &INDUSTRY_CONTENTS);
    let breakdown = BTreeMap::from([(INDUSTRY_FIT_LABEL.to_string(), score)]);
    let total_score = breakdown.values().sum::<f64>() / breakdown.len() as f64;

    AioFitScore {
        total_score,
        breakdown,
        industry: industry.to_string(),
        missing_keywords: missing,
    }
}
