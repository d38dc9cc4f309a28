// src/extract/mod.rs
// =============================================================================
// This module turns a fetched Document into raw link strings.
//
// Submodules:
// - html: every <a href> in an HTML page
// - markdown: every link destination in a Markdown document
//
// Extractors return hrefs exactly as written in the document. Resolving
// them against the page URL and filtering out mailto:, javascript:, etc.
// is the normalizer's job (src/crawl/normalize.rs).
// =============================================================================

mod html;
mod markdown;

pub use html::HtmlLinkExtractor;
pub use markdown::MarkdownLinkExtractor;

use crate::fetch::Document;

/// Produces the raw hrefs found in a document.
///
/// Must not fail: malformed markup yields whatever links could be read.
pub trait LinkExtractor: Send + Sync {
    fn extract_links(&self, doc: &Document) -> Vec<String>;
}

// Lets tests and embedders pass a closure
impl<F> LinkExtractor for F
where
    F: Fn(&Document) -> Vec<String> + Send + Sync,
{
    fn extract_links(&self, doc: &Document) -> Vec<String> {
        self(doc)
    }
}

/// Default extractor: Markdown for Markdown documents, HTML for the rest.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentLinkExtractor {
    html: HtmlLinkExtractor,
    markdown: MarkdownLinkExtractor,
}

impl DocumentLinkExtractor {
    fn is_markdown(doc: &Document) -> bool {
        match doc.content_type.as_deref() {
            Some(ct) => {
                let mime = ct.split(';').next().unwrap_or("").trim();
                mime.eq_ignore_ascii_case("text/markdown")
                    || mime.eq_ignore_ascii_case("text/x-markdown")
            }
            None => doc.url.path().to_ascii_lowercase().ends_with(".md"),
        }
    }
}

impl LinkExtractor for DocumentLinkExtractor {
    fn extract_links(&self, doc: &Document) -> Vec<String> {
        if Self::is_markdown(doc) {
            self.markdown.extract_links(doc)
        } else {
            self.html.extract_links(doc)
        }
    }
}
