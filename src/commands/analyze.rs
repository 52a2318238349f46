//! Page analysis command and report rendering

use colored::{ColoredString, Colorize};

use seoaio::aio::{AioOracle, ClaudeCliOracle};
use seoaio::analyzer::{AnalysisReport, Analyzer};
use seoaio::config::Config;
use seoaio::error::Result;
use seoaio::fetch::normalize_url;

/// Analyze a URL and print the report
pub fn cmd_analyze(
    url: &str,
    industry: Option<String>,
    balance: Option<u8>,
    no_ai: bool,
    json: bool,
) -> Result<()> {
    let config = Config::load()?;
    let industry = industry.or(config.industry.clone());
    let balance = balance.unwrap_or(config.default_balance);

    let oracle: Option<Box<dyn AioOracle>> = if no_ai || !config.ai.enabled {
        None
    } else {
        Some(Box::new(ClaudeCliOracle::new(&config.ai.command, config.ai.model.clone())))
    };
    let uses_oracle = oracle.is_some();

    if !json {
        eprintln!("\nAnalyzing {}...", normalize_url(url));
        if uses_oracle {
            eprintln!("  Asking AI for the AIO evaluation (this can take a minute)");
        }
    }

    let report = Analyzer::new(oracle).analyze_url(url, industry.as_deref(), balance)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Color a 0-100 score by band
pub(crate) fn score_colored(score: f64) -> ColoredString {
    let text = format!("{:.1}", score);
    if score >= 80.0 {
        text.green().bold()
    } else if score >= 50.0 {
        text.yellow().bold()
    } else {
        text.red().bold()
    }
}

fn bar(score: f64, max: f64) -> String {
    let filled = ((score / max).clamp(0.0, 1.0) * 20.0).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled))
}

fn print_report(report: &AnalysisReport) {
    println!("\n{}", "SEO / AIO Report".bold());
    println!("  URL:      {}", report.url);
    if !report.title.is_empty() {
        println!("  Title:    {}", report.title);
    }
    println!("  Analyzed: {}", report.analyzed_at.format("%Y-%m-%d %H:%M UTC"));

    let integrated = &report.integrated;
    println!("\n{}", "Scores".bold());
    println!("  Integrated: {} / 100", score_colored(integrated.integrated_score));
    println!("  SEO:        {} / 100  {}", score_colored(integrated.seo_score), bar(integrated.seo_score, 100.0));
    println!("  AIO:        {} / 100  {}", score_colored(integrated.aio_score), bar(integrated.aio_score, 100.0));
    println!(
        "  Weighting:  SEO {}% / AIO {}%",
        100 - u16::from(report.balance),
        report.balance
    );

    print_industry(report);

    println!("\n{}", "SEO breakdown".bold());
    if !report.tech_stack.is_empty() {
        println!("  Built with: {}", report.tech_stack.join(", "));
    }
    if !report.top_keywords.is_empty() {
        let words: Vec<String> = report
            .top_keywords
            .iter()
            .take(10)
            .map(|(word, count)| format!("{} ({})", word, count))
            .collect();
        println!("  Top words:  {}", words.join(", ").dimmed());
    }
    for (_, label, score) in report.seo.scores.entries() {
        println!("  {:<24} {:>4.1}/10  {}", label, score, bar(score, 10.0));
    }
    if report.seo.garbled.title || report.seo.garbled.meta_description {
        println!("  {}", "Title or meta description looks garbled (文字化け)".red());
    }

    print_aio(report);

    if !integrated.improvements.is_empty() {
        println!("\n{} (focus: {})", "Next steps".bold(), integrated.primary_focus.to_string().cyan());
        for (i, item) in integrated.improvements.iter().enumerate() {
            println!("  {}. {}", i + 1, item);
        }
    }
    let rec = &integrated.recommended_balance;
    println!("\n  Recommended effort: SEO {}% - AIO {}%\n", rec.seo_focus, rec.aio_focus);
}

fn print_industry(report: &AnalysisReport) {
    let industry = &report.final_industry;
    println!("\n{}", "Industry".bold());
    println!("  {} ({})", industry.primary.cyan(), industry.source);
    if !industry.secondary_detected.is_empty() {
        println!("  Also detected: {}", industry.secondary_detected.join(", "));
    }
    let analysis = &report.industry_analysis;
    if !analysis.industry_keywords.is_empty() {
        println!("  Keywords: {}", analysis.industry_keywords.join(", ").dimmed());
    }
    if !analysis.target_audience_clues.is_empty() {
        println!("  Audience: {}", analysis.target_audience_clues.join(", "));
    }
    if !analysis.regulatory_indicators.is_empty() {
        println!("  Regulatory: {}", analysis.regulatory_indicators.join(", "));
    }

    println!(
        "\n  Content fit ({}): {}%",
        report.content_profile_name,
        score_colored(report.fit_score)
    );
    println!("  {}", report.advice);
}

fn print_aio(report: &AnalysisReport) {
    let aio = &report.aio;
    if let Some(err) = &aio.error {
        println!("\n{} {}", "AI evaluation failed:".red().bold(), err);
        return;
    }
    if aio.scores.is_empty() {
        println!("\n{}", "AIO scored from content fit only (AI evaluation off)".dimmed());
        return;
    }

    println!("\n{}", "AIO breakdown".bold());
    for item in &aio.scores {
        println!("  {:<28} {:>4.1}/10  {}", item.label, item.score, bar(item.score, 10.0));
    }

    if !aio.immediate_actions.is_empty() {
        println!("\n{}", "Immediate actions".bold());
        for action in &aio.immediate_actions {
            println!("  - {}", action.action.green());
            if !action.method.is_empty() {
                println!("    How: {}", action.method);
            }
            if !action.expected_impact.is_empty() {
                println!("    Impact: {}", action.expected_impact.dimmed());
            }
        }
    }
    if !aio.medium_term_strategies.is_empty() {
        println!("\n{}", "Medium-term".bold());
        for s in &aio.medium_term_strategies {
            println!("  - {} ({})", s.strategy, s.timeline);
        }
    }
    if !aio.competitive_advantages.is_empty() {
        println!("\n{}", "Differentiation".bold());
        for a in &aio.competitive_advantages {
            println!("  - {}: {}", a.advantage, a.implementation);
        }
    }
    if !aio.market_trend_strategies.is_empty() {
        println!("\n{}", "Market trends".bold());
        for t in &aio.market_trend_strategies {
            println!("  - [{}] {}: {}", t.priority, t.trend, t.strategy);
        }
    }
}
