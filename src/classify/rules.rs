// Ordered URL rule table.
//
// Rules are evaluated top-down and the first match decides the category.
// Pattern rules match against the raw URL from its start; keyword rules look
// for a substring in the parsed hostname or path.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// How a URL should be handled by the verification pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlCategory {
    /// Video or audio that can be transcribed.
    DirectVideo,
    /// A regular web page whose article body can be scraped.
    WebArticle,
    /// Social content the pipeline does not process (photo posts, stories).
    UnsupportedSocial,
    /// Journals and scientific repositories, skipped for copyright reasons.
    Academic,
    /// Malformed or unparseable input.
    Unknown,
}

impl UrlCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectVideo => "direct_video",
            Self::WebArticle => "web_article",
            Self::UnsupportedSocial => "unsupported_social",
            Self::Academic => "academic",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UrlCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a rule inspects.
pub enum Matcher {
    /// Regex tested against the raw URL, anchored at its start.
    Pattern(Regex),
    /// Substring of the lowercase hostname or of the path.
    Keyword(&'static str),
}

pub struct Rule {
    pub category: UrlCategory,
    pub matcher: Matcher,
}

/// The parts of a URL a rule may look at.
pub struct UrlParts<'a> {
    pub raw: &'a str,
    pub host: &'a str,
    pub path: &'a str,
}

impl Rule {
    pub fn matches(&self, parts: &UrlParts<'_>) -> bool {
        match &self.matcher {
            Matcher::Pattern(re) => re.is_match(parts.raw),
            Matcher::Keyword(kw) => parts.host.contains(kw) || parts.path.contains(kw),
        }
    }
}

const DIRECT_VIDEO_PATTERNS: &[&str] = &[
    r"https://(www\.|m\.)?youtube\.com/(watch\?v=|embed/|shorts/|live/)",
    r"https://youtu\.be/",
    r"https://(www\.|m\.)?tiktok\.com/(@[^/]+)?/video/",
    r"https://(www\.)?instagram\.com/(reel|reels|tv)/[^/]+/?",
    r"https://(www\.)?(twitter|x)\.com/[^/]+/status/\d+",
    r"https://(www\.)?dailymotion\.com/video/",
    r"https://(www\.)?vimeo\.com/\d+",
    r"https://(www\.|m\.)?facebook\.com/[^/]+/videos/",
    r"https://(www\.|m\.)?facebook\.com/watch/?\?v=",
    r"https://(www\.|m\.)?facebook\.com/video\.php\?v=",
    r"https://fb\.watch/",
];

const UNSUPPORTED_SOCIAL_PATTERNS: &[&str] = &[
    r"https://(www\.|m\.)?instagram\.com/p/",
    r"https://(www\.|m\.)?youtube\.com/post/",
    r"https://(www\.|m\.)?facebook\.com/(story\.php|photo)",
];

const ACADEMIC_KEYWORDS: &[&str] = &[
    "journal",
    "jurnal",
    "doi.org",
    "arxiv.org",
    "researchgate.net",
    "academia.edu",
    "ieee.org",
    "acm.org",
    "springer.com",
    "sciencedirect.com",
];

fn anchored(pattern: &str) -> Regex {
    // Table entries are compile-time constants covered by tests.
    Regex::new(&format!("^{pattern}")).expect("valid URL rule pattern")
}

/// Every rule in evaluation order. Anything left unmatched is a web article.
pub static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let video = DIRECT_VIDEO_PATTERNS.iter().map(|p| Rule {
        category: UrlCategory::DirectVideo,
        matcher: Matcher::Pattern(anchored(p)),
    });
    let social = UNSUPPORTED_SOCIAL_PATTERNS.iter().map(|p| Rule {
        category: UrlCategory::UnsupportedSocial,
        matcher: Matcher::Pattern(anchored(p)),
    });
    let academic = ACADEMIC_KEYWORDS.iter().map(|kw| Rule {
        category: UrlCategory::Academic,
        matcher: Matcher::Keyword(kw),
    });
    video.chain(social).chain(academic).collect()
});

/// Run the table against already-split URL parts.
pub fn first_match(parts: &UrlParts<'_>) -> UrlCategory {
    RULES
        .iter()
        .find(|rule| rule.matches(parts))
        .map(|rule| rule.category)
        .unwrap_or(UrlCategory::WebArticle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts<'a>(raw: &'a str, host: &'a str, path: &'a str) -> UrlParts<'a> {
        UrlParts { raw, host, path }
    }

    #[test]
    fn test_all_patterns_compile() {
        let expected =
            DIRECT_VIDEO_PATTERNS.len() + UNSUPPORTED_SOCIAL_PATTERNS.len() + ACADEMIC_KEYWORDS.len();
        assert_eq!(RULES.len(), expected);
    }

    #[test]
    fn test_video_rules_come_before_social_rules() {
        let first_social = RULES
            .iter()
            .position(|r| r.category == UrlCategory::UnsupportedSocial)
            .unwrap();
        let last_video = RULES
            .iter()
            .rposition(|r| r.category == UrlCategory::DirectVideo)
            .unwrap();
        assert!(last_video < first_social);
    }

    #[test]
    fn test_keyword_matches_host_or_path() {
        let rule = Rule {
            category: UrlCategory::Academic,
            matcher: Matcher::Keyword("jurnal"),
        };
        assert!(rule.matches(&parts("", "jurnal.ugm.ac.id", "/")));
        assert!(rule.matches(&parts("", "kampus.ac.id", "/jurnal/123")));
        assert!(!rule.matches(&parts("", "kompas.com", "/read/123")));
    }

    #[test]
    fn test_pattern_is_anchored_at_start() {
        let rule = Rule {
            category: UrlCategory::DirectVideo,
            matcher: Matcher::Pattern(anchored(r"https://youtu\.be/")),
        };
        assert!(rule.matches(&parts("https://youtu.be/abc", "", "")));
        assert!(!rule.matches(&parts("see https://youtu.be/abc", "", "")));
    }

    #[test]
    fn test_unmatched_falls_through_to_web_article() {
        let p = parts("https://kompas.com/read/1", "kompas.com", "/read/1");
        assert_eq!(first_match(&p), UrlCategory::WebArticle);
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&UrlCategory::UnsupportedSocial).unwrap();
        assert_eq!(json, "\"unsupported_social\"");
        assert_eq!(UrlCategory::DirectVideo.to_string(), "direct_video");
    }
}
