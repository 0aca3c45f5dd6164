//! HTML link extraction
//!
//! Pulls the raw `href` value out of every `<a>` element on a page. No
//! filtering or resolution happens here; that is the scope filter's job.

use scraper::{Html, Selector};

/// Extracts raw anchor targets from HTML content
///
/// Returns one entry per `<a>` element in document order. Anchors without an
/// `href` attribute contribute an empty string, which the scope filter later
/// discards. Content that is not HTML simply produces no anchors.
///
/// # Example
///
/// ```
/// use sitewalk::crawler::extract_links;
///
/// let html = r#"<a href="/one">1</a><a name="top"></a><a href="mailto:x@y.z">m</a>"#;
/// assert_eq!(extract_links(html), vec!["/one", "", "mailto:x@y.z"]);
/// ```
pub fn extract_links(html: &str) -> Vec<String> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let document = Html::parse_document(html);

    let Ok(anchor_selector) = Selector::parse("a") else {
        return Vec::new();
    };

    document
        .select(&anchor_selector)
        .map(|element| element.value().attr("href").unwrap_or_default().to_string())
        .collect()
}
