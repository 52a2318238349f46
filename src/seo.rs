//! SEO scoring - seven 0-10 sub-scores blended into a 0-100 total

use serde::{Deserialize, Serialize};

use crate::page_facts::PageFacts;
use crate::text::detect_mojibake;

/// Sub-scores, each 0 - 10
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoScores {
    pub title_score: f64,
    pub meta_description_score: f64,
    pub headings_score: f64,
    pub content_score: f64,
    pub links_score: f64,
    pub images_score: f64,
    pub technical_score: f64,
}

impl SeoScores {
    /// (key, label, score) in report order
    pub fn entries(&self) -> [(&'static str, &'static str, f64); 7] {
        [
            ("title_score", "タイトル", self.title_score),
            ("meta_description_score", "メタディスクリプション", self.meta_description_score),
            ("headings_score", "見出し構造", self.headings_score),
            ("content_score", "コンテンツ", self.content_score),
            ("links_score", "リンク", self.links_score),
            ("images_score", "画像", self.images_score),
            ("technical_score", "技術要素", self.technical_score),
        ]
    }

    /// Mean sub-score scaled to 0 - 100
    pub fn total(&self) -> f64 {
        let entries = self.entries();
        entries.iter().map(|(_, _, s)| s).sum::<f64>() / entries.len() as f64 * 10.0
    }
}

/// Garbled-text flags for head fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GarbledFlags {
    pub title: bool,
    pub meta_description: bool,
}

/// SEO analysis of one page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoReport {
    pub scores: SeoScores,
    /// 0 - 100
    pub total_score: f64,
    pub title_length: usize,
    pub meta_description_length: usize,
    pub internal_links_count: usize,
    pub external_links_count: usize,
    pub garbled: GarbledFlags,
}

/// Score a page's SEO basics
pub fn analyze_seo(facts: &PageFacts) -> SeoReport {
    let scores = SeoScores {
        title_score: title_score(&facts.title),
        meta_description_score: meta_description_score(&facts.meta_description),
        headings_score: headings_score(facts),
        content_score: content_score(facts.word_count, facts.text_html_ratio),
        links_score: links_score(facts.internal_links.len(), facts.external_links.len()),
        images_score: images_score(facts.images_with_alt, facts.images_without_alt),
        technical_score: technical_score(
            facts.has_structured_data(),
            facts.has_viewport,
            !facts.canonical_url.is_empty(),
        ),
    };

    SeoReport {
        total_score: scores.total(),
        scores,
        title_length: facts.title.chars().count(),
        meta_description_length: facts.meta_description.chars().count(),
        internal_links_count: facts.internal_links.len(),
        external_links_count: facts.external_links.len(),
        garbled: GarbledFlags {
            title: detect_mojibake(&facts.title),
            meta_description: detect_mojibake(&facts.meta_description),
        },
    }
}

/// Title length: 30-60 chars is ideal
pub fn title_score(title: &str) -> f64 {
    if title.is_empty() {
        return 0.0;
    }
    match title.chars().count() {
        30..=60 => 10.0,
        20..=29 | 61..=70 => 8.0,
        10..=19 | 71..=80 => 6.0,
        0..=9 => 3.0,
        _ => 4.0,
    }
}

/// Meta description length: 120-156 chars is ideal
pub fn meta_description_score(description: &str) -> f64 {
    if description.is_empty() {
        return 0.0;
    }
    match description.chars().count() {
        120..=156 => 10.0,
        100..=119 | 157..=170 => 8.0,
        80..=99 | 171..=200 => 6.0,
        0..=79 => 3.0,
        _ => 4.0,
    }
}

fn headings_score(facts: &PageFacts) -> f64 {
    let counts: [usize; 6] = std::array::from_fn(|i| facts.heading_count(&format!("h{}", i + 1)));
    heading_counts_score(&counts)
}

/// Heading structure from h1..h6 counts
pub fn heading_counts_score(counts: &[usize; 6]) -> f64 {
    let (h1, h2) = (counts[0], counts[1]);

    let h1_score = match h1 {
        1 => 10.0,
        0 => 0.0,
        _ => 5.0,
    };
    let h2_score = if h2 >= 1 { 10.0 } else { 0.0 };
    // h3+ directly under an h1 skips a level
    let skips_level = h1 > 0 && h2 == 0 && counts[2..].iter().any(|&c| c > 0);
    let hierarchy_score = if skips_level { 5.0 } else { 10.0 };

    h1_score * 0.4 + h2_score * 0.3 + hierarchy_score * 0.3
}

/// Content volume and text/HTML ratio
pub fn content_score(word_count: usize, text_html_ratio: f64) -> f64 {
    let words = match word_count {
        600.. => 10.0,
        400..=599 => 8.0,
        300..=399 => 6.0,
        200..=299 => 4.0,
        _ => 2.0,
    };
    let ratio = if text_html_ratio >= 20.0 {
        10.0
    } else if text_html_ratio >= 15.0 {
        8.0
    } else if text_html_ratio >= 10.0 {
        6.0
    } else if text_html_ratio >= 5.0 {
        4.0
    } else {
        2.0
    };
    words * 0.7 + ratio * 0.3
}

pub fn links_score(internal: usize, external: usize) -> f64 {
    let internal_score = match internal {
        5.. => 10.0,
        3..=4 => 8.0,
        1..=2 => 5.0,
        _ => 0.0,
    };
    let external_score = match external {
        3.. => 10.0,
        1..=2 => 8.0,
        _ => 5.0,
    };
    internal_score * 0.7 + external_score * 0.3
}

/// Alt-text coverage; pages without images get a neutral 5
pub fn images_score(with_alt: usize, without_alt: usize) -> f64 {
    let total = with_alt + without_alt;
    if total == 0 {
        return 5.0;
    }
    let ratio = with_alt as f64 / total as f64;
    if ratio >= 1.0 {
        10.0
    } else if ratio >= 0.8 {
        8.0
    } else if ratio >= 0.6 {
        6.0
    } else if ratio >= 0.4 {
        4.0
    } else if ratio >= 0.2 {
        2.0
    } else {
        0.0
    }
}

pub fn technical_score(structured_data: bool, viewport: bool, canonical: bool) -> f64 {
    let parts = [
        if structured_data { 10.0 } else { 0.0 },
        if viewport { 10.0 } else { 0.0 },
        if canonical { 10.0 } else { 5.0 },
    ];
    parts.iter().sum::<f64>() / parts.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_score() {
        assert_eq!(title_score(&"a".repeat(50)), 10.0);
        assert_eq!(title_score(&"a".repeat(25)), 8.0);
        assert_eq!(title_score(&"a".repeat(75)), 6.0);
        assert_eq!(title_score("short"), 3.0);
        assert_eq!(title_score(&"a".repeat(90)), 4.0);
        assert_eq!(title_score(""), 0.0);
        // characters, not bytes
        assert_eq!(title_score(&"あ".repeat(30)), 10.0);
    }

    #[test]
    fn test_meta_description_score() {
        assert_eq!(meta_description_score(&"a".repeat(50)), 3.0);
        assert_eq!(meta_description_score(&"a".repeat(130)), 10.0);
        assert_eq!(meta_description_score(&"a".repeat(160)), 8.0);
        assert_eq!(meta_description_score(&"a".repeat(190)), 6.0);
        assert_eq!(meta_description_score(&"a".repeat(250)), 4.0);
    }

    #[test]
    fn test_headings_score() {
        assert!((heading_counts_score(&[1, 2, 0, 0, 0, 0]) - 10.0).abs() < 1e-9);
        assert!((heading_counts_score(&[0, 0, 0, 0, 0, 0]) - 3.0).abs() < 1e-9);
        assert!((heading_counts_score(&[1, 0, 2, 0, 0, 0]) - 5.5).abs() < 1e-9);
        assert!((heading_counts_score(&[2, 1, 0, 0, 0, 0]) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_content_score() {
        assert!((content_score(500, 20.0) - 8.6).abs() < 1e-9);
        assert!((content_score(100, 1.0) - 2.0).abs() < 1e-9);
        assert!((content_score(700, 25.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_links_score() {
        assert!((links_score(5, 3) - 10.0).abs() < 1e-9);
        assert!((links_score(0, 0) - 1.5).abs() < 1e-9);
        assert!((links_score(2, 1) - 5.9).abs() < 1e-9);
    }

    #[test]
    fn test_images_score() {
        assert_eq!(images_score(1, 4), 2.0);
        assert_eq!(images_score(0, 0), 5.0);
        assert_eq!(images_score(3, 0), 10.0);
        assert_eq!(images_score(0, 3), 0.0);
    }

    #[test]
    fn test_technical_score() {
        assert!((technical_score(false, false, false) - 5.0 / 3.0).abs() < 1e-9);
        assert_eq!(technical_score(true, true, true), 10.0);
    }

    #[test]
    fn test_total_is_mean_times_ten() {
        let scores = SeoScores {
            title_score: 10.0,
            meta_description_score: 10.0,
            headings_score: 10.0,
            content_score: 10.0,
            links_score: 10.0,
            images_score: 10.0,
            technical_score: 3.0,
        };
        assert!((scores.total() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_seo_on_page() {
        let html = r#"<html><head><title>テスト</title><meta name="description" content="Ã§Â¨"></head>
            <body><h1>見出し</h1><img src="a.png" alt="a"></body></html>"#;
        let facts = PageFacts::from_html("https://example.com/", html);
        let report = analyze_seo(&facts);

        assert_eq!(report.scores.title_score, 3.0);
        assert_eq!(report.scores.images_score, 10.0);
        assert!(report.garbled.meta_description);
        assert!(!report.garbled.title);
        assert!(report.total_score > 0.0 && report.total_score <= 100.0);
    }
}
