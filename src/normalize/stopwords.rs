// Stopword filtering: Indonesian and English lists plus common chat fillers.

use std::collections::HashSet;
use std::sync::LazyLock;

use stop_words::{get, LANGUAGE};

const CHAT_FILLERS: &[&str] = &[
    "iya", "yaa", "gak", "nya", "na", "sih", "ku", "di", "ga", "ya", "gaa", "loh", "kah", "woi",
    "woii", "woy", "yg",
];

pub static STOPWORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    let mut set: HashSet<String> = get(LANGUAGE::Indonesian).into_iter().collect();
    set.extend(get(LANGUAGE::English));
    set.extend(CHAT_FILLERS.iter().map(|w| w.to_string()));
    set
});

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Keep only the tokens that carry meaning.
pub fn filter<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    tokens.into_iter().filter(|t| !is_stopword(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_fillers_are_stopwords() {
        for filler in CHAT_FILLERS {
            assert!(is_stopword(filler), "{filler} should be filtered");
        }
    }

    #[test]
    fn test_english_and_indonesian_lists_are_merged() {
        assert!(is_stopword("the"));
        assert!(is_stopword("yang"));
    }

    #[test]
    fn test_filter_keeps_content_words() {
        let kept = filter(["vaksin", "yg", "berbahaya", "the"]);
        assert_eq!(kept, vec!["vaksin", "berbahaya"]);
    }
}
