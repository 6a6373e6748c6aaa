//! URL pattern generation and matching
//!
//! A pattern is `<origin>/<seg>/<seg>/...`, optionally ending in `/*`. A `*`
//! segment matches exactly one path segment; a trailing `/*` additionally
//! allows any number of extra trailing segments. Query strings and fragments
//! are ignored.
//!
//! Parsing follows the WHATWG URL standard (the browser's `new URL()`), so
//! origins and pathnames compare the same way they do in the extension.
//! Every public function is total: parse failures turn into the documented
//! fallbacks, never into errors.

use log::{debug, trace};
use url::Url;

use crate::types::{NormalizedUrl, PatternValidation};

/// Hex/UUID-looking segments must be at least this long to be wildcarded.
pub const MIN_HEX_SEGMENT_LEN: usize = 8;

const WILDCARD: &str = "*";
const TAIL: &str = "/*";

/// Error from [`parse_url`] and [`check_pattern`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("Empty or invalid pattern")]
    Empty,
    #[error("Invalid URL format: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

/// Parse `input` as an absolute URL.
pub fn parse_url(input: &str) -> Result<Url, PatternError> {
    if input.is_empty() {
        return Err(PatternError::Empty);
    }
    Url::parse(input).map_err(|source| PatternError::InvalidUrl {
        input: input.to_string(),
        source,
    })
}

// =============================================================================
// Normalization
// =============================================================================

/// Origin plus pathname with runs of `/` collapsed. Empty on parse failure.
pub fn normalize(url: &str) -> NormalizedUrl {
    match parse_url(url) {
        Ok(parsed) => normalize_parsed(&parsed),
        Err(_) => NormalizedUrl::default(),
    }
}

fn normalize_parsed(url: &Url) -> NormalizedUrl {
    NormalizedUrl {
        origin: url.origin().ascii_serialization(),
        path: collapse_slashes(url.path()),
    }
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !previous_slash {
                out.push(c);
            }
            previous_slash = true;
        } else {
            out.push(c);
            previous_slash = false;
        }
    }
    out
}

// =============================================================================
// Pattern Generation
// =============================================================================

/// Generalize `url` into a pattern, wildcarding numeric and hex/UUID-like
/// path segments. Always ends in `/*`. Unparseable input comes back as
/// `url + "/*"`.
pub fn to_pattern(url: &str) -> String {
    let parsed = match parse_url(url) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!("to_pattern: {err}; using input verbatim");
            return format!("{url}{TAIL}");
        }
    };

    let NormalizedUrl { origin, path } = normalize_parsed(&parsed);
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(generalize_segment)
        .collect();

    format!("{origin}/{}{TAIL}", segments.join("/"))
}

fn generalize_segment(segment: &str) -> &str {
    if is_numeric_segment(segment) || is_hex_like_segment(segment) {
        WILDCARD
    } else {
        segment
    }
}

/// `12345`
pub fn is_numeric_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// `3f2a1b9c`, `550e8400-e29b-41d4-a716-446655440000`: only hex digits and
/// hyphens, at least [`MIN_HEX_SEGMENT_LEN`] long. Long hex-alphabet words
/// such as `deadbeef` match too.
pub fn is_hex_like_segment(segment: &str) -> bool {
    segment.len() >= MIN_HEX_SEGMENT_LEN
        && segment.bytes().all(|b| b.is_ascii_hexdigit() || b == b'-')
}

// =============================================================================
// Matching
// =============================================================================

/// Does `url` belong to `pattern`?
pub fn matches(pattern: &str, url: &str) -> bool {
    if pattern.is_empty() || url.is_empty() {
        return false;
    }

    let allow_tail = pattern.ends_with(TAIL);
    let (parsed_pattern, parsed_url) = match (parse_url(&pattern_base(pattern)), parse_url(url)) {
        (Ok(p), Ok(u)) => (p, u),
        (Err(err), _) | (_, Err(err)) => {
            trace!("matches: {err}; falling back to prefix comparison");
            return prefix_match(pattern, url);
        }
    };

    let origin = parsed_pattern.origin().ascii_serialization();
    if origin != parsed_url.origin().ascii_serialization() {
        return false;
    }

    let pattern_path = if allow_tail {
        parsed_pattern.path()
    } else {
        literal_path(pattern, &origin).unwrap_or_else(|| parsed_pattern.path())
    };
    let pattern_segments = path_segments(pattern_path);
    let url_segments = path_segments(parsed_url.path());

    if allow_tail {
        if url_segments.len() < pattern_segments.len() {
            return false;
        }
    } else if url_segments.len() != pattern_segments.len() {
        return false;
    }

    pattern_segments
        .iter()
        .zip(&url_segments)
        .all(|(want, have)| *want == WILDCARD || want == have)
}

/// The pattern with its trailing `/*` turned into `/`, for URL parsing.
fn pattern_base(pattern: &str) -> String {
    match pattern.strip_suffix(TAIL) {
        Some(base) => format!("{base}/"),
        None => pattern.to_string(),
    }
}

/// What follows the origin in a pattern written without the `/*` tail, minus
/// query and fragment. `None` when the pattern does not literally start with
/// its (serialized) origin.
fn literal_path<'a>(pattern: &'a str, origin: &str) -> Option<&'a str> {
    let head = pattern.get(..origin.len())?;
    if !head.eq_ignore_ascii_case(origin) {
        return None;
    }
    Some(strip_query_and_fragment(&pattern[origin.len()..]))
}

fn path_segments(path: &str) -> Vec<&str> {
    path.trim_end_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn strip_query_and_fragment(s: &str) -> &str {
    match s.find(['?', '#']) {
        Some(end) => &s[..end],
        None => s,
    }
}

/// Fallback for unparseable input: the cleaned URL must start with the
/// cleaned pattern (minus its `/*` tail).
fn prefix_match(pattern: &str, url: &str) -> bool {
    let pattern = pattern.strip_suffix(TAIL).unwrap_or(pattern);
    strip_query_and_fragment(url).starts_with(strip_query_and_fragment(pattern))
}

// =============================================================================
// Validation
// =============================================================================

/// `Ok` if the pattern (tail turned into `/`) parses as a URL.
pub fn check_pattern(pattern: &str) -> Result<(), PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::Empty);
    }
    parse_url(&pattern_base(pattern)).map(|_| ())
}

pub fn validate_pattern(pattern: &str) -> PatternValidation {
    match check_pattern(pattern) {
        Ok(()) => PatternValidation::valid(),
        Err(err) => PatternValidation::invalid(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let n = normalize("https://Example.com:443//a///b/?q=1#frag");
        assert_eq!(n.origin, "https://example.com");
        assert_eq!(n.path, "/a/b/");

        let n = normalize("http://localhost:8080");
        assert_eq!(n.origin, "http://localhost:8080");
        assert_eq!(n.path, "/");
    }

    #[test]
    fn test_normalize_failure() {
        let n = normalize("not a url");
        assert!(n.is_empty());
        assert_eq!(n, NormalizedUrl::default());
    }

    #[test]
    fn test_segment_heuristics() {
        assert!(is_numeric_segment("58213"));
        assert!(!is_numeric_segment("v2"));
        assert!(!is_numeric_segment(""));
        assert!(is_hex_like_segment("9f8e7d6c5b4a"));
        assert!(is_hex_like_segment("550E8400-E29B-41D4-A716-446655440000"));
        assert!(is_hex_like_segment("deadbeef"));
        assert!(is_hex_like_segment("--------"));
        assert!(!is_hex_like_segment("abcdef1"));
        assert!(!is_hex_like_segment("settings"));
    }

    #[test]
    fn test_to_pattern_scenario() {
        assert_eq!(
            to_pattern("https://shop.example.com/orders/58213/items/9f8e7d6c5b4a"),
            "https://shop.example.com/orders/*/items/*/*"
        );
    }

    #[test]
    fn test_to_pattern_drops_query_and_collapses_slashes() {
        assert_eq!(
            to_pattern("https://a.com//users/42//profile?tab=1#top"),
            "https://a.com/users/*/profile/*"
        );
    }

    #[test]
    fn test_to_pattern_root() {
        assert_eq!(to_pattern("https://a.com"), "https://a.com//*");
        assert_eq!(to_pattern("https://a.com/"), "https://a.com//*");
    }

    #[test]
    fn test_to_pattern_parse_failure() {
        assert_eq!(to_pattern("not a url"), "not a url/*");
        assert_eq!(to_pattern(""), "/*");
    }

    #[test]
    fn test_reflexivity() {
        for url in [
            "https://shop.example.com/orders/58213/items/9f8e7d6c5b4a",
            "https://a.com",
            "https://a.com/",
            "http://localhost:3000/fixtures/basic-forms.html?x=1",
            "https://user:pw@a.com:8443/a//b/550e8400-e29b-41d4-a716-446655440000/",
            "https://a.com/caf%C3%A9/menu",
            "https://a.com/café/menu",
            "http://[::1]:8080/x/1",
        ] {
            let pattern = to_pattern(url);
            assert!(matches(&pattern, url), "{pattern} should match {url}");
        }
    }

    #[test]
    fn test_wildcard_segments() {
        let pattern = "https://a.com/users/*/edit/*";
        assert!(matches(pattern, "https://a.com/users/42/edit/7"));
        assert!(matches(pattern, "https://a.com/users/42/edit"));
        assert!(!matches(pattern, "https://a.com/users/42/view/7"));
        assert!(!matches(pattern, "https://a.com/users/42"));
    }

    #[test]
    fn test_trailing_tail() {
        let pattern = "https://a.com/dashboard/*";
        assert!(matches(pattern, "https://a.com/dashboard/reports/2024"));
        assert!(matches(pattern, "https://a.com/dashboard"));
        assert!(matches(pattern, "https://a.com/dashboard/"));
        assert!(!matches(pattern, "https://a.com/settings"));
        assert!(!matches(pattern, "https://a.com/"));
    }

    #[test]
    fn test_segment_count_without_tail() {
        assert!(matches("https://a.com/users/*", "https://a.com/users/1/2"));

        let exact = "https://a.com/users/*/edit";
        assert!(matches(exact, "https://a.com/users/42/edit"));
        assert!(matches(exact, "https://a.com/users/42/edit/"));
        assert!(!matches(exact, "https://a.com/users/42/edit/7"));
        assert!(!matches(exact, "https://a.com/users/42"));
    }

    #[test]
    fn test_exact_pattern_ignores_query_and_fragment() {
        assert!(matches("https://a.com/search?q=old", "https://a.com/search?q=new"));
        assert!(matches("https://a.com/a#x", "https://a.com/a"));
        assert!(!matches("https://a.com/a?x", "https://a.com/a/b"));
    }

    #[test]
    fn test_origin_strictness() {
        let pattern = "https://a.com/*";
        assert!(!matches(pattern, "http://a.com/"));
        assert!(!matches(pattern, "https://b.com/"));
        assert!(!matches(pattern, "https://a.com:8443/"));
        assert!(!matches(pattern, "https://sub.a.com/"));
        assert!(matches(pattern, "https://A.COM:443/anything"));
    }

    #[test]
    fn test_uppercase_exact_pattern() {
        assert!(matches("HTTPS://A.com/x", "https://a.com/x"));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(!matches("", "https://a.com/"));
        assert!(!matches("https://a.com/*", ""));
    }

    #[test]
    fn test_prefix_fallback() {
        assert!(matches("foo/bar/*", "foo/bar/baz?x=1"));
        assert!(matches("foo/bar", "foo/bar#frag"));
        assert!(!matches("foo/bar/*", "foo/baz"));
        // pattern parses, url does not
        assert!(!matches("https://a.com/*", "a.com/x"));
    }

    #[test]
    fn test_validate_pattern() {
        assert_eq!(validate_pattern("https://a.com/users/*/*"), PatternValidation::valid());
        assert_eq!(validate_pattern("https://a.com"), PatternValidation::valid());

        let empty = validate_pattern("");
        assert!(!empty.is_valid);
        assert_eq!(empty.error.as_deref(), Some("Empty or invalid pattern"));

        let bad = validate_pattern("a.com/*");
        assert!(!bad.is_valid);
        assert!(bad.error.unwrap().starts_with("Invalid URL format"));
    }

    #[test]
    fn test_check_pattern_error_kind() {
        assert_eq!(check_pattern(""), Err(PatternError::Empty));
        assert!(matches!(
            check_pattern("::"),
            Err(PatternError::InvalidUrl { .. })
        ));
    }
}
