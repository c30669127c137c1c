use serde::{Deserialize, Serialize};

use crate::models::resume::Resume;

/// Partition of a keyword list into the ones a resume mentions and the ones it lacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub matched_keywords: Vec<String>,
    pub missed_keywords: Vec<String>,
    /// round(100 * matched / total); 0 when there are no keywords.
    pub score: u8,
}

impl MatchResult {
    pub fn total(&self) -> usize {
        self.matched_keywords.len() + self.missed_keywords.len()
    }

    /// Fraction of keywords matched, or `None` when there were no keywords.
    pub fn ratio(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.matched_keywords.len() as f64 / total as f64),
        }
    }
}

/// Case-insensitive substring test of every keyword against `resume_text`.
pub fn match_keywords<S: AsRef<str>>(resume_text: &str, keywords: &[S]) -> MatchResult {
    if keywords.is_empty() {
        return MatchResult::default();
    }

    let haystack = resume_text.to_lowercase();
    let mut result = MatchResult::default();

    for keyword in keywords {
        let keyword = keyword.as_ref();
        if haystack.contains(&keyword.to_lowercase()) {
            result.matched_keywords.push(keyword.to_string());
        } else {
            result.missed_keywords.push(keyword.to_string());
        }
    }

    let pct = 100.0 * result.matched_keywords.len() as f64 / keywords.len() as f64;
    result.score = pct.round().clamp(0.0, 100.0) as u8;
    result
}

/// Flattens a resume and matches it against `keywords`.
pub fn analyze_resume_against_keywords<S: AsRef<str>>(
    resume: &Resume,
    keywords: &[S],
) -> MatchResult {
    match_keywords(&resume_content(resume), keywords)
}

/// All free text of a resume joined by single spaces: basic info (name, title,
/// location), summary, experiences, education, then skills.
pub fn resume_content(resume: &Resume) -> String {
    let mut parts: Vec<String> = vec![
        resume.basic_info.name.clone(),
        resume.basic_info.title.clone(),
        resume.basic_info.location.clone(),
    ];

    if let Some(summary) = resume.summary.as_deref().filter(|s| !s.is_empty()) {
        parts.push(summary.to_string());
    }

    parts.push(experience_content(resume));

    for edu in &resume.education {
        parts.push(edu.institution.clone());
        parts.push(edu.degree.clone());
        parts.push(edu.field_of_study.clone().unwrap_or_default());
        parts.push(edu.description.clone().unwrap_or_default());
    }

    parts.push(resume.skills.join(" "));
    parts.join(" ")
}

/// Text of the experience section alone: company, title, description and key skills.
pub fn experience_content(resume: &Resume) -> String {
    resume
        .experiences
        .iter()
        .flat_map(|exp| {
            [
                exp.company_name.clone(),
                exp.job_title.clone(),
                exp.description.clone(),
                exp.key_skills.join(" "),
            ]
        })
        .collect::<Vec<_>>()
        .join(" ")
}
