//! Core page extraction

use crate::config::CaptureConfig;
use crate::content_type;
use crate::eligibility;
use crate::error::CaptureRejection;
use crate::language;
use scraper::{ElementRef, Html, Selector};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;
use trellis_domain::{CapturedContent, PageMetadata};

/// Pages under this many words are discarded outright, before the
/// configurable persistence-time minimum is even consulted.
pub const HARD_MIN_WORDS: usize = 50;

// Semantic content containers, most specific first.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    r#"[role="main"]"#,
    ".post-content",
    ".article-content",
    ".entry-content",
    ".post-body",
    ".markdown-body",
    ".story-body",
    "#content",
    ".content",
];

// Subtrees never worth reading.
const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "iframe", "svg", "canvas", "nav", "form",
    "button", "footer", "aside",
];

// Class/id markers for junk containers.
const JUNK_MARKERS: &[&str] = &[
    "advert", "sponsor", "social", "share", "comment", "sidebar", "popup", "breadcrumb",
];

// Additional markers applied only on the whole-body fallback path, where
// nothing semantic narrowed the scope for us.
const AGGRESSIVE_JUNK_MARKERS: &[&str] =
    &["promo", "newsletter", "cookie", "banner", "subscribe", "signup"];

fn sel(s: &str) -> Selector {
    Selector::parse(s).expect("static selector parses")
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

fn is_excluded(el: &ElementRef, aggressive: bool) -> bool {
    let element = el.value();
    if EXCLUDED_TAGS.contains(&element.name()) {
        return true;
    }

    let id = element.id().unwrap_or("").to_lowercase();
    let classes: Vec<String> = element.classes().map(|c| c.to_lowercase()).collect();

    // "ad"/"ads" are matched as whole tokens; substring matching would also
    // catch "header" and "shadow".
    if classes.iter().any(|c| c == "ad" || c == "ads") || id == "ad" || id == "ads" {
        return true;
    }

    let marked = |marker: &str| classes.iter().any(|c| c.contains(marker)) || id.contains(marker);
    if JUNK_MARKERS.iter().any(|m| marked(m)) {
        return true;
    }
    aggressive && AGGRESSIVE_JUNK_MARKERS.iter().any(|m| marked(m))
}

// Walks the subtree and concatenates text nodes, skipping excluded branches.
// Operates on the parsed document only; the caller's HTML is never touched.
fn collect_text(el: ElementRef, aggressive: bool, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if !is_excluded(&child_el, aggressive) {
                collect_text(child_el, aggressive, out);
            }
        }
    }
}

fn clean_text(el: ElementRef, aggressive: bool) -> String {
    let mut out = String::new();
    collect_text(el, aggressive, &mut out);
    collapse_whitespace(&out)
}

// Social-card metadata, then first heading, then the document title.
fn resolve_title(doc: &Html) -> Option<String> {
    for meta in [r#"meta[property="og:title"]"#, r#"meta[name="twitter:title"]"#] {
        if let Some(el) = doc.select(&sel(meta)).next() {
            if let Some(content) = el.value().attr("content") {
                let title = collapse_whitespace(content);
                if !title.is_empty() {
                    return Some(title);
                }
            }
        }
    }
    for heading in ["h1", "title"] {
        if let Some(el) = doc.select(&sel(heading)).next() {
            let title = collapse_whitespace(&el.text().collect::<String>());
            if !title.is_empty() {
                return Some(title);
            }
        }
    }
    None
}

fn resolve_body(doc: &Html, config: &CaptureConfig) -> Option<String> {
    // 1. First semantic container with a substantial amount of text.
    for selector in CONTENT_SELECTORS {
        if let Some(el) = doc.select(&sel(selector)).next() {
            let text = clean_text(el, false);
            if word_count(&text) >= HARD_MIN_WORDS {
                debug!(selector, "body resolved from semantic container");
                return Some(text);
            }
        }
    }

    // 2. Score paragraphs by word count, keep the top N in document order.
    let mut scored: Vec<(usize, usize, String)> = doc
        .select(&sel("p"))
        .enumerate()
        .map(|(position, el)| {
            let text = clean_text(el, false);
            (word_count(&text), position, text)
        })
        .filter(|(words, _, _)| *words > 0)
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let mut top: Vec<(usize, String)> = scored
        .into_iter()
        .take(config.top_paragraph_count)
        .map(|(_, position, text)| (position, text))
        .collect();
    top.sort_by_key(|(position, _)| *position);

    let joined = top
        .into_iter()
        .map(|(_, text)| text)
        .collect::<Vec<_>>()
        .join(" ");
    if word_count(&joined) >= HARD_MIN_WORDS {
        debug!("body resolved from top-scored paragraphs");
        return Some(joined);
    }

    // 3. Whole body with aggressive junk removal.
    let body = doc.select(&sel("body")).next()?;
    let text = clean_text(body, true);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Capture a page: eligibility, extraction, cleaning, validity, classification.
///
/// Pure over its inputs apart from reading the clock; never blocks on I/O and
/// never mutates the passed HTML.
pub fn capture_page(
    url: &str,
    html: &str,
    config: &CaptureConfig,
) -> Result<CapturedContent, CaptureRejection> {
    let parsed = eligibility::check_url(url, config)?;
    let domain = parsed.host_str().unwrap_or_default().to_string();

    let doc = Html::parse_document(html);
    let title = resolve_title(&doc).unwrap_or_else(|| domain.clone());
    let text = resolve_body(&doc, config).ok_or(CaptureRejection::EmptyBody)?;

    let words = word_count(&text);
    if words < HARD_MIN_WORDS {
        return Err(CaptureRejection::TooShort {
            words,
            min: HARD_MIN_WORDS,
        });
    }
    if !language::looks_natural(&text) {
        return Err(CaptureRejection::NotNaturalLanguage);
    }

    let content_type = content_type::classify(&title, &text, &domain);
    let captured_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs();

    Ok(CapturedContent {
        url: url.to_string(),
        title,
        text,
        captured_at,
        metadata: PageMetadata {
            domain,
            content_type: content_type.to_string(),
            word_count: words,
        },
    })
}
