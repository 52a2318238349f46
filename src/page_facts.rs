//! PageFacts - Unified feature extraction from web pages
//!
//! This module captures everything the SEO scorer and the industry engine
//! need from a page in one pass over the HTML. Extraction is best-effort:
//! a malformed page yields empty fields, never an error.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::text::normalize_whitespace;

/// Elements whose text never counts as page content
const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "noscript", "header", "footer", "nav", "aside", "form", "iframe",
];

/// Blocks inside the main content that are not part of the article
const EXCLUDED_CLASSES: &[&str] = &["comments", "social-sharing", "related-posts"];

/// Candidate main-content containers, tried in order
const MAIN_SELECTORS: &[&str] = &["article", "main", ".main-content", "#content", "#main", ".post-content"];

/// A main-content block must be longer than this to count
const MIN_BLOCK_CHARS: usize = 200;

/// Stop collecting main-content blocks past this length
const MAX_MAIN_CHARS: usize = 5000;

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "you", "your", "from", "are", "was", "were",
    "have", "has", "not", "but", "can", "will", "his", "her", "its", "she", "him", "our", "out",
    "use", "using",
];

/// Second-level labels under a ccTLD (example.co.jp)
const SECOND_LEVEL_LABELS: &[&str] = &["co", "or", "ne", "ac", "go", "ed", "gr", "lg", "com", "net", "org"];

static LATIN_WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-z]{3,}").expect("Invalid latin word regex")
});

/// Open Graph fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub image: String,
}

/// Unified feature extraction from a web page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageFacts {
    /// Page URL (after redirects)
    pub url: String,
    /// Raw HTML content
    #[serde(skip_serializing, default)]
    pub html: String,

    // === Head ===

    pub title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub meta_author: String,
    pub meta_generator: String,
    pub open_graph: OpenGraph,
    pub canonical_url: String,
    pub has_viewport: bool,
    pub meta_tags_count: usize,

    // === Structure ===

    /// Heading counts keyed "h1".."h6"
    pub headings: HashMap<String, usize>,
    /// First three heading texts for h1..h3
    pub heading_texts: HashMap<String, Vec<String>>,
    pub internal_links: Vec<String>,
    pub external_links: Vec<String>,
    pub images_count: usize,
    pub images_with_alt: usize,
    pub images_without_alt: usize,

    // === Structured data ===

    pub structured_data_count: usize,
    /// JSON-LD @type values of top-level items (e.g., "Organization")
    pub structured_data_types: Vec<String>,

    // === Content ===

    /// Main content text used by the industry engine
    pub main_content: String,
    pub word_count: usize,
    /// Visible text length relative to HTML length, in percent
    pub text_html_ratio: f64,
    pub page_size_kb: f64,
    /// Most frequent latin words of the main content
    pub top_keywords: Vec<(String, usize)>,
    /// CMS hints (WordPress, Shopify, Wix)
    pub tech_stack: Vec<String>,
}

impl PageFacts {
    /// Extract all features from a page's HTML
    pub fn from_html(url: &str, html: &str) -> Self {
        let document = Html::parse_document(html);
        let mut facts = Self {
            url: url.to_string(),
            html: html.to_string(),
            ..Default::default()
        };

        facts.extract_head(&document);
        facts.extract_headings(&document);
        facts.extract_links(&document);
        facts.extract_images(&document);
        facts.extract_json_ld(&document);
        facts.extract_content(&document);
        facts.detect_tech_stack();
        facts
    }

    /// Title, meta tags, canonical link
    fn extract_head(&mut self, document: &Html) {
        if let Some(title) = select_first(document, "title") {
            self.title = normalize_whitespace(&title.text().collect::<String>());
        }

        if let Ok(selector) = Selector::parse("meta") {
            self.meta_tags_count = document.select(&selector).count();
        }

        self.meta_description = meta_content(document, "name", "description");
        self.meta_keywords = meta_content(document, "name", "keywords");
        self.meta_author = meta_content(document, "name", "author");
        self.meta_generator = meta_content(document, "name", "generator");
        self.has_viewport = select_first(document, r#"meta[name="viewport"]"#).is_some();

        self.open_graph = OpenGraph {
            title: meta_content(document, "property", "og:title"),
            description: meta_content(document, "property", "og:description"),
            image: meta_content(document, "property", "og:image"),
        };

        if let Some(link) = select_first(document, r#"link[rel="canonical"][href]"#) {
            self.canonical_url = link.value().attr("href").unwrap_or_default().trim().to_string();
        }
    }

    /// Heading counts and the first few heading texts
    fn extract_headings(&mut self, document: &Html) {
        for level in 1..=6 {
            let tag = format!("h{}", level);
            let Ok(selector) = Selector::parse(&tag) else {
                continue;
            };

            let elements: Vec<ElementRef> = document.select(&selector).collect();
            if level <= 3 {
                let texts = elements
                    .iter()
                    .take(3)
                    .map(|h| normalize_whitespace(&h.text().collect::<String>()))
                    .collect();
                self.heading_texts.insert(tag.clone(), texts);
            }
            self.headings.insert(tag, elements.len());
        }
    }

    /// Split anchors into internal and external links
    fn extract_links(&mut self, document: &Html) {
        let Ok(selector) = Selector::parse("a[href]") else {
            return;
        };
        let Ok(base) = Url::parse(&self.url) else {
            return;
        };
        let Some(base_domain) = base.host_str().map(registrable_domain) else {
            return;
        };

        for element in document.select(&selector) {
            let href = element.value().attr("href").unwrap_or_default().trim();
            if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
                continue;
            }

            let Ok(resolved) = base.join(href) else {
                continue;
            };
            let Some(link_domain) = resolved.host_str().map(registrable_domain) else {
                // mailto:, tel: and friends have no host
                continue;
            };

            if link_domain == base_domain {
                self.internal_links.push(resolved.to_string());
            } else {
                self.external_links.push(resolved.to_string());
            }
        }
    }

    /// Count images with and without alt text
    fn extract_images(&mut self, document: &Html) {
        let Ok(selector) = Selector::parse("img") else {
            return;
        };

        for element in document.select(&selector) {
            self.images_count += 1;
            let has_alt = element
                .value()
                .attr("alt")
                .map(|alt| !alt.trim().is_empty())
                .unwrap_or(false);
            if has_alt {
                self.images_with_alt += 1;
            }
        }
        self.images_without_alt = self.images_count - self.images_with_alt;
    }

    /// JSON-LD blocks and their top-level @type values
    fn extract_json_ld(&mut self, document: &Html) {
        let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
            return;
        };

        for element in document.select(&selector) {
            self.structured_data_count += 1;
            let text: String = element.text().collect();
            let Ok(json) = serde_json::from_str::<serde_json::Value>(&text) else {
                continue;
            };

            let items = match json {
                serde_json::Value::Array(items) => items,
                other => vec![other],
            };
            for item in &items {
                if let Some(t) = item.get("@type") {
                    let type_name = match t {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    self.structured_data_types.push(type_name);
                }
            }
        }
    }

    /// Main content, word count, ratios and keyword frequencies
    fn extract_content(&mut self, document: &Html) {
        self.main_content = extract_main_content(document);
        self.word_count = self.main_content.split_whitespace().count();

        let all_text = visible_text(document.root_element(), false);
        let html_len = self.html.chars().count();
        self.text_html_ratio = if html_len == 0 {
            0.0
        } else {
            all_text.chars().count() as f64 / html_len as f64 * 100.0
        };
        self.page_size_kb = self.html.len() as f64 / 1024.0;
        self.top_keywords = top_keywords(&self.main_content, 10);
    }

    /// CMS fingerprints from the generator tag and raw HTML
    fn detect_tech_stack(&mut self) {
        let generator = self.meta_generator.to_lowercase();
        let lower_html = self.html.to_lowercase();

        if generator.contains("wordpress") || lower_html.contains("wp-content") {
            self.tech_stack.push("WordPress".to_string());
        }
        if generator.contains("shopify") || lower_html.contains("shopify") {
            self.tech_stack.push("Shopify".to_string());
        }
        if generator.contains("wix") || lower_html.contains("wixsite") {
            self.tech_stack.push("Wix".to_string());
        }
    }

    /// Whether the page has any JSON-LD block
    pub fn has_structured_data(&self) -> bool {
        self.structured_data_count > 0
    }

    /// Heading count for a level ("h1".."h6")
    pub fn heading_count(&self, tag: &str) -> usize {
        self.headings.get(tag).copied().unwrap_or(0)
    }
}

fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// Content of `<meta {attr}="{value}" content="...">`, trimmed, or empty
fn meta_content(document: &Html, attr: &str, value: &str) -> String {
    select_first(document, &format!(r#"meta[{}="{}"]"#, attr, value))
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .unwrap_or_default()
}

/// Find the article text of a page.
///
/// Collects long text blocks from the usual content containers; falls back
/// to the body text when none is long enough.
fn extract_main_content(document: &Html) -> String {
    let mut parts: Vec<String> = Vec::new();

    for css in MAIN_SELECTORS {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = visible_text(element, true);
            if text.chars().count() > MIN_BLOCK_CHARS {
                parts.push(text);
                let joined = parts.join(" ");
                if joined.chars().count() > MAX_MAIN_CHARS {
                    return joined;
                }
            }
        }
    }

    if !parts.is_empty() {
        return parts.join(" ");
    }

    match select_first(document, "body") {
        Some(body) => visible_text(body, false),
        None => visible_text(document.root_element(), false),
    }
}

/// Space-joined, trimmed text nodes under `element`, skipping non-content tags
fn visible_text(element: ElementRef, skip_side_blocks: bool) -> String {
    let mut pieces = Vec::new();
    collect_text(element, skip_side_blocks, &mut pieces);
    pieces.join(" ")
}

fn collect_text(element: ElementRef, skip_side_blocks: bool, out: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_string());
            }
            continue;
        }

        let Some(child_el) = ElementRef::wrap(child) else {
            continue;
        };
        let el = child_el.value();
        if EXCLUDED_TAGS.contains(&el.name()) {
            continue;
        }
        if skip_side_blocks && el.classes().any(|c| EXCLUDED_CLASSES.contains(&c)) {
            continue;
        }
        collect_text(child_el, skip_side_blocks, out);
    }
}

/// Approximate the registrable domain of a host (example.co.jp, example.com)
fn registrable_domain(host: &str) -> String {
    let host = host.trim_start_matches("www.").to_lowercase();
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() <= 2 {
        return host;
    }

    let n = labels.len();
    let keep = if labels[n - 1].len() == 2 && SECOND_LEVEL_LABELS.contains(&labels[n - 2]) {
        3
    } else {
        2
    };
    labels[n - keep..].join(".")
}

/// Most frequent latin words (3+ letters, stop words removed), ties in first-seen order
fn top_keywords(text: &str, limit: usize) -> Vec<(String, usize)> {
    let lowered = text.to_lowercase();
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for m in LATIN_WORD_RE.find_iter(&lowered) {
        let word = m.as_str();
        if STOP_WORDS.contains(&word) {
            continue;
        }
        match index.get(word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word.to_string(), counts.len());
                counts.push((word.to_string(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r##"
        <!DOCTYPE html>
        <html>
        <head>
            <title>  駅前の不動産会社 | サンプル不動産  </title>
            <meta name="description" content="マンション・戸建ての売買と賃貸">
            <meta name="viewport" content="width=device-width">
            <meta name="generator" content="WordPress 6.4">
            <meta property="og:title" content="サンプル不動産">
            <link rel="canonical" href="https://www.sample.co.jp/">
            <script type="application/ld+json">{"@type": "RealEstateAgent", "name": "Sample"}</script>
        </head>
        <body>
            <nav>ホーム 会社概要 お問い合わせ</nav>
            <h1>サンプル不動産</h1>
            <h2>物件情報</h2>
            <h2>アクセス</h2>
            <article>
                <p>駅前で30年。マンションや戸建ての売買、賃貸物件の仲介をしています。</p>
                <div class="comments">コメント欄の文章</div>
            </article>
            <a href="/about">会社概要</a>
            <a href="https://blog.sample.co.jp/">ブログ</a>
            <a href="https://portal.example.com/">ポータル</a>
            <a href="#top">トップへ</a>
            <a href="mailto:info@sample.co.jp">メール</a>
            <img src="a.jpg" alt="外観">
            <img src="b.jpg" alt=" ">
            <footer>Copyright</footer>
        </body>
        </html>
    "##;

    #[test]
    fn test_head_extraction() {
        let facts = PageFacts::from_html("https://www.sample.co.jp/", SAMPLE_HTML);

        assert_eq!(facts.title, "駅前の不動産会社 | サンプル不動産");
        assert_eq!(facts.meta_description, "マンション・戸建ての売買と賃貸");
        assert_eq!(facts.open_graph.title, "サンプル不動産");
        assert_eq!(facts.canonical_url, "https://www.sample.co.jp/");
        assert!(facts.has_viewport);
        assert_eq!(facts.meta_tags_count, 4);
        assert_eq!(facts.tech_stack, vec!["WordPress".to_string()]);
    }

    #[test]
    fn test_structure_extraction() {
        let facts = PageFacts::from_html("https://www.sample.co.jp/", SAMPLE_HTML);

        assert_eq!(facts.heading_count("h1"), 1);
        assert_eq!(facts.heading_count("h2"), 2);
        assert_eq!(facts.heading_count("h5"), 0);
        assert_eq!(facts.heading_texts["h2"], vec!["物件情報", "アクセス"]);

        assert_eq!(facts.internal_links.len(), 2);
        assert_eq!(facts.external_links.len(), 1);

        assert_eq!(facts.images_count, 2);
        assert_eq!(facts.images_with_alt, 1);
        assert_eq!(facts.images_without_alt, 1);

        assert!(facts.has_structured_data());
        assert_eq!(facts.structured_data_types, vec!["RealEstateAgent".to_string()]);
    }

    #[test]
    fn test_short_article_falls_back_to_body() {
        let facts = PageFacts::from_html("https://www.sample.co.jp/", SAMPLE_HTML);

        // the article is under the minimum block length, so the body is used
        assert!(facts.main_content.contains("サンプル不動産"));
        assert!(facts.main_content.contains("戸建て"));
        assert!(!facts.main_content.contains("ホーム 会社概要"));
        assert!(!facts.main_content.contains("Copyright"));
        assert!(facts.word_count > 0);
    }

    #[test]
    fn test_long_article_is_main_content() {
        let body = "施工事例を紹介します。".repeat(30);
        let html = format!(
            r#"<html><body><nav>menu</nav><article><p>{}</p><div class="related-posts">関連記事</div></article><p>outside</p></body></html>"#,
            body
        );
        let facts = PageFacts::from_html("https://example.com/", &html);

        assert!(facts.main_content.starts_with("施工事例"));
        assert!(!facts.main_content.contains("関連記事"));
        assert!(!facts.main_content.contains("outside"));
    }

    #[test]
    fn test_registrable_domain() {
        assert_eq!(registrable_domain("www.sample.co.jp"), "sample.co.jp");
        assert_eq!(registrable_domain("blog.sample.co.jp"), "sample.co.jp");
        assert_eq!(registrable_domain("a.b.example.com"), "example.com");
        assert_eq!(registrable_domain("example.com"), "example.com");
    }

    #[test]
    fn test_top_keywords() {
        let keywords = top_keywords("Rust and rust with the Cloud cloud cloud api", 2);
        assert_eq!(keywords, vec![("cloud".to_string(), 3), ("rust".to_string(), 2)]);
    }

    #[test]
    fn test_empty_html() {
        let facts = PageFacts::from_html("not a url", "");
        assert!(facts.title.is_empty());
        assert!(facts.internal_links.is_empty());
        assert_eq!(facts.text_html_ratio, 0.0);
    }
}
