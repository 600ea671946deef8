use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

// Simple stopword list
static STOPWORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

pub fn get_stopwords() -> &'static HashSet<&'static str> {
    STOPWORDS.get_or_init(|| {
        [
  "a", "about", "above", "am", "an", "and", "any", "are", "as", "at",
  "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
  "can", "cannot", "could",
  "did", "do", "does", "doing", "down", "during",
  "each", "few", "for", "from", "further",
  "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how",
  "i", "if", "in", "into", "is", "it", "its", "itself",
  "me", "more", "most", "my", "myself",
  "of", "off", "on", "once", "only", "or", "other", "our", "ours", "out", "over", "own",
  "same", "she", "should", "so", "some", "such",
  "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "those", "through", "to", "too",
  "under", "until", "up", "us",
  "very",
  "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would",
  "you", "your", "yours"
].into_iter().collect()
    })
}

fn get_token_regex() -> &'static Regex {
    // Word characters: Unicode letters, digits, underscore
    TOKEN_REGEX.get_or_init(|| Regex::new(r"\w+").unwrap())
}

/// Splits text into lowercase word tokens, keeping order and duplicates.
/// Punctuation and whitespace are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    get_token_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Tokens with stopwords removed, used for keyword retrieval.
pub fn content_tokens(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| !get_stopwords().contains(t.as_str()))
        .collect()
}
