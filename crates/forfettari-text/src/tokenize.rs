use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern compiles"));

/// Split `text` into lowercase word tokens, dropping single-character words.
///
/// `\w` is Unicode-aware, so accented Italian letters stay inside words.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|word| word.chars().nth(1).is_some())
        .map(str::to_lowercase)
        .collect()
}

/// Relative term frequency: occurrences divided by the total token count.
pub fn term_frequency(tokens: &[String]) -> HashMap<String, f64> {
    if tokens.is_empty() {
        return HashMap::new();
    }
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    let total = tokens.len() as f64;
    counts.into_iter().map(|(term, count)| (term.to_string(), count as f64 / total)).collect()
}
