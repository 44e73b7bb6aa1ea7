//! Turns raw text into normalized index/query terms.
//!
//! Two modes are supported: `simple` (ASCII punctuation stripping and
//! lowercasing) and `linguistic` (word tokenization, English stopword
//! removal, Porter stemming). Both `tokenize_line` and `tokenize_token` route
//! through the same per-token normalization so that a query term stemmed at
//! search time matches the term stemmed at index time.

use rust_stemmers::{Algorithm, Stemmer};
use serde::Deserialize;

const SPLIT_CHARS: &[char] = &[' ', '\t', '-', '/', ',', '.', '(', ')'];

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does", "doesn't",
    "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had", "hadn't",
    "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her", "here",
    "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd", "i'll",
    "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "let's",
    "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on",
    "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own",
    "same", "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some",
    "such", "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then",
    "there", "there's", "these", "they", "they'd", "they'll", "they're", "they've", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we",
    "we'd", "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's",
    "where", "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with", "won't",
    "would", "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves",
];

/// How terms are normalized before being added to (or looked up in) an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerMode {
    #[default]
    Simple,
    Linguistic,
}

impl std::str::FromStr for TokenizerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(TokenizerMode::Simple),
            "linguistic" => Ok(TokenizerMode::Linguistic),
            other => Err(format!("unknown tokenizer mode '{other}', expected 'simple' or 'linguistic'")),
        }
    }
}

/// Stateless normalizer for a given [`TokenizerMode`].
///
/// The Porter stemmer keeps internal state, so a `Tokenizer` is constructed
/// once per build/query and reused across lines.
pub struct Tokenizer {
    mode: TokenizerMode,
    stemmer: Stemmer,
}

impl Tokenizer {
    pub fn new(mode: TokenizerMode) -> Self {
        Tokenizer {
            mode,
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Tokenize a full line of text into normalized, non-empty terms.
    pub fn tokenize_line(&self, line: &str) -> Vec<String> {
        match self.mode {
            TokenizerMode::Simple => self.tokenize_line_simple(line),
            TokenizerMode::Linguistic => self.tokenize_line_linguistic(line),
        }
    }

    /// Tokenize a single token the same way `tokenize_line` would, returning
    /// the first normalized term produced (or `None` if it normalizes away
    /// entirely, e.g. a pure-stopword query term).
    pub fn tokenize_token(&self, token: &str) -> Option<String> {
        self.tokenize_line(token).into_iter().next()
    }

    fn tokenize_line_simple(&self, line: &str) -> Vec<String> {
        line.split(SPLIT_CHARS)
            .filter_map(|raw| {
                let ascii: String = raw.chars().filter(|c| c.is_ascii()).collect();
                let cleaned: String = ascii
                    .chars()
                    .filter(|c| !c.is_ascii_punctuation())
                    .collect::<String>()
                    .to_lowercase();
                let trimmed = cleaned.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect()
    }

    fn tokenize_line_linguistic(&self, line: &str) -> Vec<String> {
        word_tokenize(line)
            .into_iter()
            .filter_map(|raw| {
                let lower = raw.to_lowercase();
                if STOP_WORDS.contains(&lower.as_str()) {
                    return None;
                }
                let stemmed = self.stemmer.stem(&lower).to_string();
                if !stemmed.chars().any(|c| c.is_alphanumeric()) {
                    return None;
                }
                Some(stemmed)
            })
            .collect()
    }
}

/// A small, dependency-free Penn-Treebank-style word tokenizer: splits off
/// punctuation as separate tokens and separates common contractions.
fn word_tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    let flush = |current: &mut String, tokens: &mut Vec<String>| {
        if !current.is_empty() {
            tokens.push(std::mem::take(current));
        }
    };

    for c in line.chars() {
        if c.is_whitespace() {
            flush(&mut current, &mut tokens);
        } else if c.is_alphanumeric() || c == '\'' {
            current.push(c);
        } else {
            flush(&mut current, &mut tokens);
            tokens.push(c.to_string());
        }
    }
    flush(&mut current, &mut tokens);

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_strips_punctuation_and_lowercases() {
        let t = Tokenizer::new(TokenizerMode::Simple);
        assert_eq!(
            t.tokenize_line("Hello, World! Foo-bar/baz."),
            vec!["hello", "world", "foo", "bar", "baz"]
        );
    }

    #[test]
    fn simple_drops_non_ascii() {
        let t = Tokenizer::new(TokenizerMode::Simple);
        assert_eq!(t.tokenize_line("caf\u{e9}"), vec!["caf"]);
    }

    #[test]
    fn linguistic_removes_stopwords_and_stems() {
        let t = Tokenizer::new(TokenizerMode::Linguistic);
        let tokens = t.tokenize_line("The runners are running quickly");
        assert!(!tokens.iter().any(|w| w == "the" || w == "are"));
        assert!(tokens.contains(&"runner".to_string()) || tokens.contains(&"run".to_string()));
    }

    #[test]
    fn tokenize_token_matches_tokenize_line_first_element() {
        let t = Tokenizer::new(TokenizerMode::Simple);
        assert_eq!(t.tokenize_token("Hello!"), Some("hello".to_string()));
    }

    #[test]
    fn tokenize_token_on_pure_stopword_is_none_in_linguistic_mode() {
        let t = Tokenizer::new(TokenizerMode::Linguistic);
        assert_eq!(t.tokenize_token("the"), None);
    }
}
