//! URL canonicalization.
//!
//! Every URL the engine compares, enqueues or stores goes through here first.
//! The canonical form is `scheme://netloc` followed by the path; query strings
//! and fragments are dropped. Nothing in this module fails: input the `url`
//! crate rejects is split by hand instead.

use url::Url;

const DEFAULT_SCHEME: &str = "http";

/// Resolves `raw` against `base` and reduces the result to its canonical form.
///
/// Relative paths, protocol-relative references (`//host/x`) and
/// fragment-only references (`#top`) all resolve against `base`.
pub fn normalize(raw: &str, base: &str) -> String {
    let raw = raw.trim();

    let resolved = Url::parse(base)
        .and_then(|base| base.join(raw))
        .or_else(|_| Url::parse(raw));

    match resolved {
        Ok(url) => canonical(&url),
        Err(_) => lenient(raw),
    }
}

/// Canonicalizes a URL typed by a user, where there is no page to resolve
/// against. `example.com` and `example.com/docs` are treated as hosts, not
/// as relative paths.
pub fn normalize_seed(raw: &str) -> String {
    let raw = raw.trim();

    let parsed = if raw.contains("://") {
        Url::parse(raw)
    } else {
        Url::parse(&format!("{}://{}", DEFAULT_SCHEME, raw.trim_start_matches('/')))
    };

    match parsed {
        Ok(url) => canonical(&url),
        Err(_) => lenient(raw),
    }
}

/// Returns the network location (`user:pass@host:port`) of an already
/// normalized URL.
pub fn netloc(normalized: &str) -> &str {
    let rest = match normalized.find("://") {
        Some(idx) => &normalized[idx + 3..],
        None => normalized,
    };
    match rest.find('/') {
        Some(idx) => &rest[..idx],
        None => rest,
    }
}

fn canonical(url: &Url) -> String {
    // Opaque URIs such as `mailto:x@y.com` have no authority; their path
    // takes the network location slot.
    if url.cannot_be_a_base() || (!url.has_host() && url.scheme() != "file") {
        return format!("{}://{}", url.scheme(), url.path());
    }

    let mut url = url.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.to_string()
}

fn lenient(raw: &str) -> String {
    let without_fragment = raw.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();

    let (scheme, rest) = match without_query.split_once("://") {
        Some((scheme, rest)) if !scheme.is_empty() => (scheme, rest),
        Some((_, rest)) => (DEFAULT_SCHEME, rest),
        None => (
            DEFAULT_SCHEME,
            without_query.strip_prefix("//").unwrap_or(without_query),
        ),
    };

    let (netloc, path) = match rest.find('/') {
        Some(0) => (rest, ""),
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };

    format!("{}://{}{}", scheme, netloc, path)
}
