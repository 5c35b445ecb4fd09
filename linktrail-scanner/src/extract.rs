use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

/// Pulls every `<a href>` out of an HTML page.
///
/// Hrefs are resolved against `base_url` where possible; anything that does
/// not resolve is passed through untouched so the normalizer can have a go at
/// it. Never fails: markup html5ever can't make sense of just yields fewer
/// (usually zero) links.
pub fn extract_links(body: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(body);
    let base = Url::parse(base_url).ok();

    let links: Vec<String> = document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| {
            let href = href.trim();
            base.as_ref()
                .and_then(|base| base.join(href).ok())
                .map(|resolved| resolved.to_string())
                .unwrap_or_else(|| href.to_string())
        })
        .collect();

    debug!("Extracted {} links from {}", links.len(), base_url);
    links
}
