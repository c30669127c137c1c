//! Word lists and limits that drive keyword extraction.
//!
//! The built-in lists can be replaced at startup with a JSON file
//! (`KEYWORD_LEXICON_PATH`), which keeps the extractor free of hardcoded data.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "an", "and", "the", "in", "on", "at", "to", "for", "with", "by", "about", "as", "of",
    "is", "are",
];

/// Technical and professional terms checked by substring against the job text.
/// Order matters: matches are reported in this order.
const DEFAULT_VOCABULARY: &[&str] = &[
    "javascript", "react", "nodejs", "typescript", "html", "css", "frontend", "backend", "aws",
    "python", "java", "c#", "c++", "sql", "nosql", "mongodb", "postgresql", "mysql", "api",
    "rest", "graphql", "docker", "kubernetes", "ci/cd", "git", "github", "devops", "agile",
    "scrum", "kanban", "jira", "machine learning", "ai", "data science", "analytics",
    "cloud", "azure", "gcp", "leadership", "team", "manage", "communication", "project",
    "product", "design", "ux", "ui", "research", "testing", "qa", "security", "seo",
    "marketing", "sales", "customer", "service", "support", "finance", "accounting", "hr",
    "recruitment", "talent", "business", "strategy", "analysis", "operations", "logistics",
];

pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 3;
pub const DEFAULT_FREQUENCY_CANDIDATES: usize = 15;
pub const DEFAULT_MAX_KEYWORDS: usize = 20;

#[derive(Debug, Clone)]
pub struct Lexicon {
    stopwords: HashSet<String>,
    vocabulary: Vec<String>,
    /// Tokens with fewer characters are discarded.
    pub min_token_length: usize,
    /// How many of the most frequent tokens are considered after the vocabulary pass.
    pub frequency_candidates: usize,
    pub max_keywords: usize,
}

/// On-disk shape of a lexicon override.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LexiconFile {
    stopwords: Vec<String>,
    vocabulary: Vec<String>,
    min_token_length: Option<usize>,
    frequency_candidates: Option<usize>,
    max_keywords: Option<usize>,
}

impl Lexicon {
    pub fn new<S, V>(stopwords: S, vocabulary: V) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let stopwords = stopwords
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        let mut seen = HashSet::new();
        let vocabulary = vocabulary
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect();

        Self {
            stopwords,
            vocabulary,
            min_token_length: DEFAULT_MIN_TOKEN_LENGTH,
            frequency_candidates: DEFAULT_FREQUENCY_CANDIDATES,
            max_keywords: DEFAULT_MAX_KEYWORDS,
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let file: LexiconFile =
            serde_json::from_str(raw).context("Keyword lexicon is not valid JSON")?;
        let mut lexicon = Self::new(file.stopwords, file.vocabulary);
        if let Some(n) = file.min_token_length {
            lexicon.min_token_length = n;
        }
        if let Some(n) = file.frequency_candidates {
            lexicon.frequency_candidates = n;
        }
        if let Some(n) = file.max_keywords {
            lexicon.max_keywords = n;
        }
        Ok(lexicon)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read keyword lexicon {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("Failed to load keyword lexicon {}", path.display()))
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(DEFAULT_STOPWORDS, DEFAULT_VOCABULARY)
    }
}
