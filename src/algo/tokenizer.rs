use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

use super::lemma;

/// Normalize free text into a space-joined stream of lemmatized,
/// stop-word-free tokens. `None` normalizes to the empty string.
pub fn normalize(text: Option<&str>) -> String {
    text.map(normalize_str).unwrap_or_default()
}

/// Normalize a synopsis for the description channel.
///
/// Pipeline: clean and lowercase, drop ASCII punctuation, split on word
/// boundaries, drop stop words, lemmatize, rejoin with single spaces.
pub fn normalize_str(text: &str) -> String {
    let cleaned = strip_punctuation(&clean(text));
    let tokens: Vec<String> = tokenize(&cleaned)
        .into_iter()
        .filter(|w| !is_stopword(w))
        .map(|w| lemma::lemmatize(&w))
        .collect();
    tokens.join(" ")
}

/// Lowercase and drop formatting noise: emoji, pictographs, control
/// characters and any other symbol that is neither alphanumeric, whitespace
/// nor ASCII punctuation.
///
/// Lowercasing runs first: some capitals expand to a letter plus a
/// combining mark ("İ" -> "i\u{307}"), and the mark must be filtered too.
pub fn clean(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || c.is_ascii_punctuation())
        .collect()
}

/// Remove ASCII punctuation without inserting a separator, so
/// "don't" becomes "dont" and "sci-fi" becomes "scifi".
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Split text into lowercase word tokens on Unicode word boundaries.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

/// Vectorizer analyzer: runs of two or more word characters, lowercased.
/// Single-character tokens are discarded.
pub fn analyze(text: &str) -> Vec<String> {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    let re = TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));
    let lower = text.to_lowercase();
    re.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

/// Lowercase each entry and remove its inner whitespace, so names collapse
/// into single tokens ("Brad Pitt" -> "bradpitt"). Anything that is not a
/// list yields an empty list.
pub fn lower_strip_list(values: Option<&[String]>) -> Vec<String> {
    match values {
        Some(values) => values.iter().map(|v| lower_strip_str(v)).collect(),
        None => Vec::new(),
    }
}

/// Scalar counterpart of [`lower_strip_list`]; missing values yield `""`.
pub fn lower_strip_scalar(value: Option<&str>) -> String {
    value.map(lower_strip_str).unwrap_or_default()
}

fn lower_strip_str(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Keep at most the first `n` entries.
pub fn top_n(mut values: Vec<String>, n: usize) -> Vec<String> {
    values.truncate(n);
    values
}

/// English stop words (the NLTK list, apostrophe forms omitted since
/// punctuation is gone by the time tokens are filtered).
pub fn is_stopword(word: &str) -> bool {
    matches!(
        word,
        "i" | "me" | "my" | "myself" | "we" | "our" | "ours" | "ourselves" | "you" | "your"
        | "yours" | "yourself" | "yourselves" | "he" | "him" | "his" | "himself" | "she"
        | "her" | "hers" | "herself" | "it" | "its" | "itself" | "they" | "them" | "their"
        | "theirs" | "themselves" | "what" | "which" | "who" | "whom" | "this" | "that"
        | "these" | "those" | "am" | "is" | "are" | "was" | "were" | "be" | "been" | "being"
        | "have" | "has" | "had" | "having" | "do" | "does" | "did" | "doing" | "a" | "an"
        | "the" | "and" | "but" | "if" | "or" | "because" | "as" | "until" | "while" | "of"
        | "at" | "by" | "for" | "with" | "about" | "against" | "between" | "into" | "through"
        | "during" | "before" | "after" | "above" | "below" | "to" | "from" | "up" | "down"
        | "in" | "out" | "on" | "off" | "over" | "under" | "again" | "further" | "then"
        | "once" | "here" | "there" | "when" | "where" | "why" | "how" | "all" | "any"
        | "both" | "each" | "few" | "more" | "most" | "other" | "some" | "such" | "no" | "nor"
        | "not" | "only" | "own" | "same" | "so" | "than" | "too" | "very" | "s" | "t" | "can"
        | "will" | "just" | "don" | "should" | "now" | "d" | "ll" | "m" | "o" | "re" | "ve"
        | "y" | "ain" | "aren" | "couldn" | "didn" | "doesn" | "hadn" | "hasn" | "haven"
        | "isn" | "ma" | "mightn" | "mustn" | "needn" | "shan" | "shouldn" | "wasn" | "weren"
        | "won" | "wouldn"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_basic() {
        assert_eq!(normalize_str("A hero saves the day!"), "hero save day");
    }

    #[test]
    fn normalize_none_is_empty() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("")), "");
    }

    #[test]
    fn normalize_strips_emoji_and_case() {
        assert_eq!(normalize_str("GHOSTS 👻 haunt Houses"), "ghost haunt house");
    }

    #[test]
    fn normalize_removes_punctuation_without_splitting() {
        assert_eq!(normalize_str("A sci-fi thriller, isn't it?"), "scifi thriller isnt");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "Two friends travel across the cities of Europe, chasing their dreams.",
            "The children of the wolves fight zombies in 1999!",
            "A detective's last case: murders, lies & movies.",
            "Classes, boxes, buses and watches",
            "",
        ];
        for s in samples {
            let once = normalize_str(s);
            assert_eq!(normalize_str(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn clean_drops_marks_from_expanded_capitals() {
        assert_eq!(clean("İstanbul"), "istanbul");
        assert_eq!(normalize_str("İstanbul"), "istanbul");
    }

    #[test]
    fn normalize_is_idempotent_with_non_ascii_capitals() {
        let samples = ["İstanbul nights", "ÉCOLE Ærø ΣΟΦΙΑ", "Straße ǅemal Ǉubljana"];
        for s in samples {
            let once = normalize_str(s);
            assert_eq!(normalize_str(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn analyze_drops_single_chars() {
        assert_eq!(analyze("a hero x saves 42"), vec!["hero", "saves", "42"]);
    }

    #[test]
    fn analyze_lowercases() {
        assert_eq!(analyze("Action DRAMA"), vec!["action", "drama"]);
    }

    #[test]
    fn lower_strip_list_collapses_names() {
        let names = vec!["Brad Pitt".to_string(), " Meryl  Streep ".to_string()];
        assert_eq!(lower_strip_list(Some(&names)), vec!["bradpitt", "merylstreep"]);
    }

    #[test]
    fn lower_strip_list_non_list_is_empty() {
        assert!(lower_strip_list(None).is_empty());
    }

    #[test]
    fn lower_strip_scalar_basic() {
        assert_eq!(lower_strip_scalar(Some("Christopher Nolan")), "christophernolan");
        assert_eq!(lower_strip_scalar(None), "");
    }

    #[test]
    fn top_n_truncates() {
        let v = vec!["a".to_string(), "b".to_string()];
        assert_eq!(top_n(v.clone(), 1), vec!["a"]);
        assert_eq!(top_n(v, 5).len(), 2);
    }

    #[test]
    fn stopwords() {
        assert!(is_stopword("the"));
        assert!(is_stopword("wouldn"));
        assert!(!is_stopword("hero"));
    }
}
