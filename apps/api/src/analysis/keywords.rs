//! Keyword extraction from free-text job descriptions.

use std::collections::HashMap;

use crate::analysis::lexicon::Lexicon;

/// Extracts salient keywords from a job description.
///
/// Vocabulary terms found anywhere in the text come first, in vocabulary
/// order. They are followed by repeated tokens (count > 1) drawn from the
/// most frequent candidates, highest count first with ties kept in order of
/// first appearance. The result is lowercase, duplicate-free and capped at
/// `lexicon.max_keywords`.
pub fn extract_keywords(text: &str, lexicon: &Lexicon) -> Vec<String> {
    let lowered = text.to_lowercase();
    if lowered.trim().is_empty() {
        return Vec::new();
    }

    let mut keywords: Vec<String> = Vec::new();

    for term in lexicon.vocabulary() {
        if lowered.contains(term.as_str()) && !keywords.contains(term) {
            keywords.push(term.clone());
        }
    }

    for (token, count) in ranked_tokens(&lowered, lexicon)
        .into_iter()
        .take(lexicon.frequency_candidates)
    {
        if count > 1 && !keywords.iter().any(|k| k == token) {
            keywords.push(token.to_string());
        }
    }

    keywords.truncate(lexicon.max_keywords);
    keywords
}

/// Splits lowercased text into alphanumeric tokens.
pub fn tokenize(lowered: &str) -> impl Iterator<Item = &str> {
    lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}

/// Counts non-stopword tokens and orders them by descending count.
/// Ties keep first-occurrence order (the sort is stable).
fn ranked_tokens<'a>(lowered: &'a str, lexicon: &Lexicon) -> Vec<(&'a str, usize)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for token in tokenize(lowered) {
        if token.chars().count() < lexicon.min_token_length || lexicon.is_stopword(token) {
            continue;
        }
        let count = counts.entry(token).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    let mut ranked: Vec<(&str, usize)> = order.into_iter().map(|t| (t, counts[t])).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}
