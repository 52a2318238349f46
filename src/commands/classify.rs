//! Local text classification: the core engine without fetching

use std::io::Read;
use std::path::PathBuf;

use colored::Colorize;

use seoaio::advice::generate_actionable_advice;
use seoaio::classify::detect_industry;
use seoaio::corpus::INDUSTRY_CONTENTS;
use seoaio::error::{Result, SeoAioError};
use seoaio::industry::analyze_industries;
use seoaio::personalization::calculate_personalization_score;

use super::analyze::score_colored;

/// Run industry detection, classification and fit scoring on text
pub fn cmd_classify(
    text: Option<String>,
    file: Option<PathBuf>,
    title: &str,
    meta: &str,
    json: bool,
) -> Result<()> {
    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    if text.trim().is_empty() && title.is_empty() && meta.is_empty() {
        return Err(SeoAioError::InvalidInput("no text to classify".into()));
    }

    let analysis = analyze_industries(title, &text, meta);
    let profile_key = detect_industry(&text);
    let (fit_score, missing) = calculate_personalization_score(&text, profile_key, &INDUSTRY_CONTENTS);
    let advice = generate_actionable_advice(&missing, profile_key);

    if json {
        let output = serde_json::json!({
            "industry_analysis": analysis,
            "content_profile": profile_key,
            "fit_score": fit_score,
            "missing_keywords": missing,
            "advice": advice,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("\n{}", "Industry".bold());
    println!(
        "  {} (confidence {:.1}%)",
        analysis.primary_industry.cyan(),
        analysis.confidence_score
    );
    if !analysis.secondary_industries.is_empty() {
        println!("  Also: {}", analysis.secondary_industries.join(", "));
    }
    if !analysis.industry_keywords.is_empty() {
        println!("  Keywords: {}", analysis.industry_keywords.join(", ").dimmed());
    }

    let profile_name = INDUSTRY_CONTENTS
        .get(profile_key)
        .map(|p| p.display_name.as_str())
        .unwrap_or(profile_key);
    println!("\n{}", "Content fit".bold());
    println!("  Profile: {} ({})", profile_name, profile_key);
    println!("  Score:   {}%", score_colored(fit_score));
    if !missing.is_empty() {
        println!("  Missing: {}", missing.join(", ").yellow());
    }
    println!("\n  {}\n", advice);
    Ok(())
}
