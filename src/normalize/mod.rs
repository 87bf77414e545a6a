// Text normalization for the hoax classifier.
//
// The classifier was trained on text that went through exactly these steps,
// in this order: cleaning, case folding, slang substitution, tokenization and
// stopword removal. Changing a step changes what the model sees.
//
// Normalizing already-normalized text returns it unchanged.

pub mod slang;
pub mod stopwords;

use std::sync::LazyLock;

use regex::Regex;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid normalization pattern")
}

static MENTION: LazyLock<Regex> = LazyLock::new(|| regex(r"@[A-Za-z0-9_]+"));
// \w and \d are Unicode-aware, so "#caféviral" goes as a whole.
static HASHTAG: LazyLock<Regex> = LazyLock::new(|| regex(r"#\w+"));
static LINK: LazyLock<Regex> = LazyLock::new(|| regex(r"http\S+"));
static DIGITS: LazyLock<Regex> = LazyLock::new(|| regex(r"\d+"));
static SENTENCE_PUNCT: LazyLock<Regex> = LazyLock::new(|| regex(r#"([,.!?()"])"#));
static JOINED_WORDS: LazyLock<Regex> =
    LazyLock::new(|| regex(r#"([a-zA-Z]+)["()_-]([a-zA-Z]+)"#));
static ENCLITIC: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\b(\w*[^aeiou\s])(nya|nua|neo)\b"));

/// Collapse every run of whitespace (any Unicode kind) into one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleaning stages: strip social markup, links and digits, separate and
/// remove punctuation, drop non-ASCII, split enclitics.
pub fn clean(text: &str) -> String {
    let text = collapse_whitespace(text);

    let text = MENTION.replace_all(&text, "");
    let text = HASHTAG.replace_all(&text, "");
    let text = LINK.replace_all(&text, "");
    let text = DIGITS.replace_all(&text, "");

    let text = SENTENCE_PUNCT.replace_all(&text, " ${1} ");

    // Single pass: "a_b_c" becomes "a b_c", then "a bc" once punctuation goes.
    let text = JOINED_WORDS.replace_all(&text, "${1} ${2}");

    let text: String = text
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_punctuation())
        .collect();

    let text = ENCLITIC.replace_all(&text, "${1} ${2}");
    collapse_whitespace(&text)
}

pub fn case_fold(text: &str) -> String {
    text.to_lowercase()
}

/// Replace each whitespace-separated slang token with its standard form.
pub fn substitute_slang(text: &str) -> String {
    text.split_whitespace()
        .map(|word| slang::lookup(word).unwrap_or(word))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Run the full pipeline. The result may be empty.
pub fn normalize(text: &str) -> String {
    let cleaned = case_fold(&clean(text));
    let substituted = substitute_slang(&cleaned);
    let tokens = tokenize(&substituted);
    stopwords::filter(tokens).join(" ")
}
