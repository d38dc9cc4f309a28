// src/crawl/normalize.rs
// =============================================================================
// Turns raw hrefs into canonical URLs and decides which ones may be crawled.
//
// Canonical form is what the url crate serializes after parsing:
// - scheme and host lower-cased
// - default port dropped (http://a.test:80/ -> http://a.test/)
// - empty path becomes "/" (http://a.test -> http://a.test/)
// plus one rule of our own: the #fragment is removed, since
// page#intro and page#usage are the same document.
//
// Everything here is pure; nothing touches the network.
// =============================================================================

use crate::config::CrawlScope;
use crate::error::EngineError;
use url::Url;

/// Resolves `raw_href` against the page it was found on.
///
/// Returns None for hrefs that do not name another document: empty,
/// fragment-only (#section) or unparseable. Scheme filtering happens in
/// is_eligible, so `mailto:x@y.com` still comes back as a Url here.
pub fn normalize(base: &Url, raw_href: &str) -> Option<Url> {
    let href = raw_href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    // join() handles both absolute and relative hrefs
    let mut url = base.join(href).ok()?;
    url.set_fragment(None);
    Some(url)
}

/// Only http(s) URLs with a host go into the frontier.
pub fn is_eligible(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
        && url.host_str().is_some_and(|host| !host.is_empty())
}

/// Whether a link stays inside the crawl scope relative to the seed.
pub fn in_scope(scope: CrawlScope, seed: &Url, url: &Url) -> bool {
    match scope {
        CrawlScope::Any => true,
        CrawlScope::SameHost => seed.host_str() == url.host_str(),
    }
}

/// Parses the starting URL, rejecting anything the crawler could not fetch.
pub fn parse_seed(raw: &str) -> Result<Url, EngineError> {
    let invalid = |reason: String| EngineError::InvalidSeed {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !is_eligible(&url) {
        return Err(invalid("only http and https URLs with a host can be crawled".into()));
    }
    url.set_fragment(None);
    Ok(url)
}
