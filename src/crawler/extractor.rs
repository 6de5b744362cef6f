//! Page extractor: turns fetched markup into a record and its raw links
//!
//! Extraction is a pure transform. It never filters links by scope and never
//! deduplicates them; both are the controller's concern.

use crate::output::{PageRecord, BLANK};
use crate::url::Address;
use scraper::{ElementRef, Html, Selector};

/// Extracts the descriptive fields and outbound links of a page
///
/// # Field rules
///
/// - **title**: text of the first `<title>`, trimmed
/// - **meta title**: `content` of `<meta name="title">`, else of
///   `<meta property="og:title">`; the first tag found decides, even when it
///   lacks a `content` attribute
/// - **meta description**: `content` of `<meta name="description">`
///
/// Missing or empty values become [`BLANK`].
///
/// # Links
///
/// Every `<a href>` in document order, resolved against `source`. References
/// that do not resolve to an http(s) address are dropped.
///
/// # Example
///
/// ```
/// use site_survey::crawler::extract;
/// use site_survey::url::Address;
///
/// let source = Address::parse("https://example.com/").unwrap();
/// let html = r#"<html><head><title> Home </title></head><body><a href="/about">About</a></body></html>"#;
/// let (record, links) = extract(html, &source);
/// assert_eq!(record.title, "Home");
/// assert_eq!(record.meta_title, "blank");
/// assert_eq!(links[0].as_str(), "https://example.com/about");
/// ```
pub fn extract(markup: &str, source: &Address) -> (PageRecord, Vec<Address>) {
    let document = Html::parse_document(markup);

    let record = PageRecord {
        title: extract_title(&document).unwrap_or_else(blank),
        meta_title: extract_meta_title(&document).unwrap_or_else(blank),
        meta_description: extract_meta_content(&document, r#"meta[name="description"]"#)
            .unwrap_or_else(blank),
        source: source.clone(),
    };

    (record, extract_links(&document, source))
}

fn blank() -> String {
    BLANK.to_string()
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .and_then(non_empty)
}

fn extract_meta_title(document: &Html) -> Option<String> {
    let tag = first_match(document, r#"meta[name="title"]"#)
        .or_else(|| first_match(document, r#"meta[property="og:title"]"#))?;
    content_of(tag)
}

fn extract_meta_content(document: &Html, selector: &str) -> Option<String> {
    first_match(document, selector).and_then(content_of)
}

fn first_match<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

fn content_of(element: ElementRef<'_>) -> Option<String> {
    element
        .value()
        .attr("content")
        .map(str::to_string)
        .and_then(non_empty)
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Extracts all resolvable links from the HTML document
fn extract_links(document: &Html, source: &Address) -> Vec<Address> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| source.resolve(href))
        .collect()
}
