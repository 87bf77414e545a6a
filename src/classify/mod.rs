// URL detection and classification.
//
// `is_url` decides whether user input should be treated as a link at all.
// `classify` maps a link to the handling category that drives extraction.

pub mod rules;

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::{debug, warn};
use url::Url;

pub use rules::UrlCategory;
use rules::UrlParts;

static URL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:http|ftp)s?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)",
        r"|localhost",
        r"|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("valid URL shape pattern")
});

/// Whether `s` looks like an http(s)/ftp(s) URL with a real host.
pub fn is_url(s: &str) -> bool {
    !s.is_empty() && URL_SHAPE.is_match(s)
}

/// Decide how a URL should be processed.
///
/// Malformed or empty input is `Unknown`; anything that parses but matches
/// no rule is treated as a web article.
pub fn classify(url: &str) -> UrlCategory {
    let url = url.trim();
    if url.is_empty() {
        return UrlCategory::Unknown;
    }

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(url, error = %e, "Could not parse URL");
            return UrlCategory::Unknown;
        }
    };

    let parts = UrlParts {
        raw: url,
        host: parsed.host_str().unwrap_or_default(),
        path: parsed.path(),
    };
    let category = rules::first_match(&parts);

    match category {
        UrlCategory::UnsupportedSocial | UrlCategory::Academic => {
            warn!(url, %category, "URL will not be processed")
        }
        _ => debug!(url, %category, "Classified URL"),
    }
    category
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url_accepts_common_shapes() {
        assert!(is_url("https://example.com/page?q=1"));
        assert!(is_url("http://localhost:8080/"));
        assert!(is_url("ftp://192.168.1.10/file"));
        assert!(is_url("HTTPS://EXAMPLE.COM"));
    }

    #[test]
    fn test_is_url_rejects_prose() {
        assert!(!is_url("not a url"));
        assert!(!is_url(""));
        assert!(!is_url("example.com"));
        assert!(!is_url("https://example.com with trailing words"));
    }

    #[test]
    fn test_classify_empty_and_garbage() {
        assert_eq!(classify(""), UrlCategory::Unknown);
        assert_eq!(classify("   "), UrlCategory::Unknown);
        assert_eq!(classify("not a url"), UrlCategory::Unknown);
    }
}
