//! Request-path normalization and candidate filtering.
//!
//! Only a narrow class of paths can name a tracked link; everything else is
//! rejected up front so the link store is never queried for assets, feeds or
//! service endpoints.

/// Path prefixes owned by the service or the surrounding platform.
const RESERVED_PREFIXES: &[&str] = &["api", "health", "static", "wp-"];

/// Well-known system endpoints that are never link slugs.
const SYSTEM_ENDPOINTS: &[&str] = &["robots.txt", "sitemap.xml", "xmlrpc", "favicon.ico"];

/// Normalizes a raw request path and returns the candidate slug, or `None`
/// when the path cannot name a tracked link.
///
/// Normalization strips the query string, the fragment and surrounding
/// slashes. Rejected afterwards:
///
/// - the empty path
/// - reserved prefixes (`api`, `health`, `static`, `wp-`)
/// - feed-like paths (containing `feed`)
/// - paths containing a dot (static-asset heuristic)
/// - known system endpoints (`robots.txt`, `sitemap.xml`, `xmlrpc`, ...)
pub fn candidate_slug(raw_path: &str) -> Option<String> {
    let path = raw_path
        .split(['?', '#'])
        .next()
        .unwrap_or("")
        .trim_matches('/');

    if path.is_empty() {
        return None;
    }

    if RESERVED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return None;
    }

    if path.contains("feed") {
        return None;
    }

    // Covers favicon.ico, sitemap.xml and anything asset-shaped.
    if path.contains('.') {
        return None;
    }

    if SYSTEM_ENDPOINTS.contains(&path) {
        return None;
    }

    Some(path.to_string())
}
