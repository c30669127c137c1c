//! Heuristic ATS compatibility score (0–100) from resume completeness signals.
//!
//! Weights:
//!   no experience                → 0, nothing else counts
//!   base                         → 50
//!   filled basic-info fields     → 2 each, up to 10
//!   experience entries           → 5 each, up to 20
//!   keyword match ratio          → up to 20, when keywords were supplied
//!   otherwise skill entries      → 1 each, up to 10

use crate::analysis::matcher::MatchResult;
use crate::models::resume::Resume;

const BASE_SCORE: f64 = 50.0;
const BASIC_INFO_POINTS_PER_FIELD: f64 = 2.0;
const BASIC_INFO_CAP: f64 = 10.0;
const EXPERIENCE_POINTS_PER_ENTRY: f64 = 5.0;
const EXPERIENCE_CAP: f64 = 20.0;
const KEYWORD_CAP: f64 = 20.0;
const SKILLS_CAP: f64 = 10.0;

/// Counts the scorer needs; derived from a resume or supplied directly.
#[derive(Debug, Clone, Default)]
pub struct ProfileSignals<'a> {
    pub basic_info_fields: usize,
    pub experience_count: usize,
    pub skill_count: usize,
    pub keyword_match: Option<&'a MatchResult>,
}

impl<'a> ProfileSignals<'a> {
    pub fn from_resume(resume: &Resume, keyword_match: Option<&'a MatchResult>) -> Self {
        Self {
            basic_info_fields: resume.basic_info.filled_field_count(),
            experience_count: resume.experiences.len(),
            skill_count: resume.filled_skill_count(),
            keyword_match,
        }
    }
}

pub fn compute_ats_score(signals: &ProfileSignals<'_>) -> u8 {
    if signals.experience_count == 0 {
        return 0;
    }

    let mut score = BASE_SCORE;
    score += (signals.basic_info_fields as f64 * BASIC_INFO_POINTS_PER_FIELD).min(BASIC_INFO_CAP);
    score += (signals.experience_count as f64 * EXPERIENCE_POINTS_PER_ENTRY).min(EXPERIENCE_CAP);

    // A match over zero keywords carries no signal; fall back to skills.
    match signals.keyword_match.and_then(MatchResult::ratio) {
        Some(ratio) => score += (ratio * KEYWORD_CAP).min(KEYWORD_CAP),
        None => score += (signals.skill_count as f64).min(SKILLS_CAP),
    }

    score.round().clamp(0.0, 100.0) as u8
}
