//! Resume improvement tips. Suggestions appear in the order the checks run.

use std::sync::OnceLock;

use regex::Regex;

use crate::analysis::matcher::{analyze_resume_against_keywords, experience_content, MatchResult};
use crate::models::resume::Resume;

const MIN_SUMMARY_CHARS: usize = 50;
const MIN_SKILLS: usize = 5;
const MAX_LISTED_KEYWORDS: usize = 5;
const MIN_SPECIFIC_SUGGESTIONS: usize = 3;

pub const ADD_BASIC_INFO: &str = "Add your basic information to improve your resume.";
pub const ADD_SUMMARY: &str =
    "Add a professional summary that includes relevant keywords from the job description.";
pub const EXPAND_SUMMARY: &str =
    "Expand your professional summary to at least 50 characters and weave in keywords from the job description.";
pub const ADD_EXPERIENCE: &str = "Add work experiences with measurable achievements.";
pub const QUANTIFY_ACHIEVEMENTS: &str =
    "Include quantifiable achievements in your experience descriptions (e.g., \"Increased sales by 25%\").";
pub const ADD_SKILLS: &str =
    "Add a skills section with relevant technical skills from the job description.";
pub const EXPAND_SKILLS: &str =
    "List at least 5 skills, prioritizing the ones named in the job description.";
pub const ADD_EDUCATION: &str = "Add your educational background to complete your resume.";
pub const STANDARD_HEADINGS_TIP: &str =
    "Use standard section headings (e.g., \"Experience\" not \"Where I've Worked\").";
pub const SIMPLE_FORMATTING_TIP: &str =
    "Keep formatting simple - avoid tables, headers/footers, and images.";

fn achievement_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)\d+%|\d+ percent|increased|decreased|improved|reduced|generated|saved|managed|led|launched",
        )
        .expect("achievement pattern is a valid regex")
    })
}

/// Produces improvement tips for `resume` given its keyword match result.
pub fn generate_suggestions(resume: &Resume, keyword_match: &MatchResult) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();

    let missing_fields = resume.basic_info.missing_required();
    if missing_fields.len() == 5 {
        suggestions.push(ADD_BASIC_INFO.to_string());
    } else if !missing_fields.is_empty() {
        suggestions.push(format!(
            "Complete your basic information section for better ATS recognition (missing: {}).",
            missing_fields.join(", ")
        ));
    }

    match resume.summary.as_deref().map(str::trim) {
        None | Some("") => suggestions.push(ADD_SUMMARY.to_string()),
        Some(summary) if summary.chars().count() < MIN_SUMMARY_CHARS => {
            suggestions.push(EXPAND_SUMMARY.to_string())
        }
        Some(_) => {}
    }

    if resume.experiences.is_empty() {
        suggestions.push(ADD_EXPERIENCE.to_string());
    } else if !resume
        .experiences
        .iter()
        .any(|exp| achievement_pattern().is_match(&exp.description))
    {
        suggestions.push(QUANTIFY_ACHIEVEMENTS.to_string());
    }

    let gaps = experience_keyword_gaps(resume, keyword_match);
    if !gaps.is_empty() {
        let listed = gaps
            .iter()
            .take(MAX_LISTED_KEYWORDS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let more = if gaps.len() > MAX_LISTED_KEYWORDS { "..." } else { "" };
        suggestions.push(format!(
            "Include these missing keywords in your experience descriptions: {listed}{more}"
        ));
    }

    let skill_count = resume.filled_skill_count();
    if skill_count == 0 {
        suggestions.push(ADD_SKILLS.to_string());
    } else if skill_count < MIN_SKILLS {
        suggestions.push(EXPAND_SKILLS.to_string());
    }

    if resume.education.is_empty() {
        suggestions.push(ADD_EDUCATION.to_string());
    }

    if suggestions.len() < MIN_SPECIFIC_SUGGESTIONS {
        suggestions.push(STANDARD_HEADINGS_TIP.to_string());
        suggestions.push(SIMPLE_FORMATTING_TIP.to_string());
    }

    suggestions
}

/// Matches `resume` against `keywords` and produces tips from the result.
pub fn generate_resume_suggestions<S: AsRef<str>>(resume: &Resume, keywords: &[S]) -> Vec<String> {
    let keyword_match = analyze_resume_against_keywords(resume, keywords);
    generate_suggestions(resume, &keyword_match)
}

/// Keywords the experience section does not mention: those missing from the
/// whole resume first, then those present only outside the experiences.
fn experience_keyword_gaps(resume: &Resume, keyword_match: &MatchResult) -> Vec<String> {
    let experience_text = experience_content(resume).to_lowercase();
    let mut gaps = keyword_match.missed_keywords.clone();
    gaps.extend(
        keyword_match
            .matched_keywords
            .iter()
            .filter(|k| !experience_text.contains(&k.to_lowercase()))
            .cloned(),
    );
    gaps
}
