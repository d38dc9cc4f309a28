// src/extract/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, which recovers from broken markup the way
//   browsers do, so a messy page still gives us its links
// =============================================================================

use super::LinkExtractor;
use crate::fetch::Document;
use scraper::{Html, Selector};

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    // Returns the href of every <a> tag, in document order
    //
    // Example:
    //   html = "<a href='/docs'>Docs</a><a>no href</a>"
    //   result = ["/docs"]
    fn extract_links(&self, doc: &Document) -> Vec<String> {
        let document = Html::parse_document(&doc.body);

        // The selector is a constant, parsing only fails on a typo here
        let Ok(selector) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        document
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn extract(html: &str) -> Vec<String> {
        let doc = Document::new(Url::parse("https://example.com/page/").unwrap(), html);
        HtmlLinkExtractor.extract_links(&doc)
    }

    #[test]
    fn test_extract_absolute_link() {
        let links = extract(r#"<a href="https://www.rust-lang.org">Rust</a>"#);
        assert_eq!(links, vec!["https://www.rust-lang.org"]);
    }

    #[test]
    fn test_keeps_raw_hrefs() {
        let links = extract(
            r#"
            <a href="/docs">Docs</a>
            <a href="../about">About</a>
            <a href="mailto:test@example.com">Email</a>
            "#,
        );
        assert_eq!(links, vec!["/docs", "../about", "mailto:test@example.com"]);
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let links = extract(r#"<a name="top">Top</a><a href="/x">X</a>"#);
        assert_eq!(links, vec!["/x"]);
    }

    #[test]
    fn test_malformed_markup() {
        let links = extract(r#"<div><a href=/one>one</a><span><a href='/two'>two</div"#);
        assert_eq!(links, vec!["/one", "/two"]);
    }
}
