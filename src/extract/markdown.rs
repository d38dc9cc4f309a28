// src/extract/markdown.rs
// =============================================================================
// This module extracts links from Markdown text.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Is fast and memory-efficient (it's a streaming parser)
//
// Unlike HTML pages, a README often uses relative links (./docs/guide.md).
// Those are kept here and resolved later like any other href.
// =============================================================================

use super::LinkExtractor;
use crate::fetch::Document;
use pulldown_cmark::{Event, Parser, Tag};

#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownLinkExtractor;

impl LinkExtractor for MarkdownLinkExtractor {
    fn extract_links(&self, doc: &Document) -> Vec<String> {
        Parser::new(&doc.body)
            .filter_map(|event| match event {
                // In pulldown-cmark 0.9, Link is Tag::Link(link_type, dest_url, title)
                Event::Start(Tag::Link(_link_type, dest_url, _title)) => {
                    Some(dest_url.to_string())
                }
                _ => None,
            })
            .collect()
    }
}
