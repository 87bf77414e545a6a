// Article text extraction from raw HTML.
//
// Noise elements are detached from the tree first, then the first matching
// article container is read (falling back to <body>). The page title is
// prepended because headlines often carry the claim being checked.

use scraper::{Html, Selector};
use tracing::debug;

use crate::normalize::collapse_whitespace;

const NOISE_ELEMENTS: &str =
    "script, style, nav, header, footer, aside, form, button, iframe, img, svg, figcaption, figure, noscript";

/// Article containers used by Indonesian news sites and common CMS themes.
const ARTICLE_SELECTORS: &[&str] = &[
    r#"div[itemprop="articleBody"]"#,
    r#"article[itemprop="articleBody"]"#,
    "div.entry-content",
    "div.td-post-content",
    "div.post-content",
    "div.article-content",
    "div.story-content",
    "div.content",
    "article",
    "main",
    r#"div[role="main"]"#,
    "div.read__content",
    "div.detail-content",
    "div.post-body",
    "div.story-body",
    "div.post-detail",
    "div.body_artikel",
    "div.section_detail_content",
    r#"div[class*="article-body"]"#,
    r#"div[class*="post-content"]"#,
    r#"div[class*="entry-content"]"#,
    r#"div[class*="main-content"]"#,
    r#"div[class*="text-content"]"#,
    r#"div[class*="content__body"]"#,
];

/// Extract the readable text of an article page, or `None` when the page
/// holds nothing worth verifying.
pub fn article_text(html: &str) -> Option<String> {
    if html.trim().is_empty() {
        return None;
    }

    let mut document = Html::parse_document(html);
    strip_noise(&mut document);

    let title = Selector::parse("title")
        .ok()
        .and_then(|sel| {
            document
                .select(&sel)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
        })
        .unwrap_or_default();

    let body = main_container_text(&document).unwrap_or_default();

    let text = collapse_whitespace(&format!("{title} {body}"));
    if text.is_empty() {
        return None;
    }
    debug!(chars = text.len(), "Extracted article text");
    Some(text)
}

fn strip_noise(document: &mut Html) {
    let Ok(noise) = Selector::parse(NOISE_ELEMENTS) else {
        return;
    };
    let ids: Vec<_> = document.select(&noise).map(|el| el.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn main_container_text(document: &Html) -> Option<String> {
    for selector_str in ARTICLE_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            debug!(selector = selector_str, "Article container found");
            return Some(joined_text(element.text()));
        }
    }

    let body = Selector::parse("body").ok()?;
    document.select(&body).next().map(|el| joined_text(el.text()))
}

/// Join text nodes with single spaces, skipping whitespace-only nodes.
fn joined_text<'a>(nodes: impl Iterator<Item = &'a str>) -> String {
    nodes
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
