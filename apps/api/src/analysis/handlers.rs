//! Axum route handlers for keyword analysis.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::analysis::ats_score::{compute_ats_score, ProfileSignals};
use crate::analysis::keywords::extract_keywords;
use crate::analysis::matcher::{analyze_resume_against_keywords, MatchResult};
use crate::analysis::suggestions::generate_suggestions;
use crate::errors::AppError;
use crate::extractors::{parse_id, ValidJson};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

/// Either explicit keywords or a stored job description to take them from.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeAnalysisRequest {
    pub keywords: Option<Vec<String>>,
    pub job_description_id: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysisResponse {
    pub keywords: Vec<String>,
    #[serde(rename = "match")]
    pub keyword_match: MatchResult,
    pub ats_score: u8,
    pub suggestions: Vec<String>,
}

/// POST /api/analyze-job-description
///
/// Extracts keywords from `{ content }` without storing anything.
pub async fn handle_analyze_job_description(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<Value>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let content = body
        .get("content")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation("Job description content is required".to_string()))?;

    let keywords = extract_keywords(content, &state.lexicon);
    debug!(count = keywords.len(), "Extracted job description keywords");

    Ok(Json(KeywordsResponse { keywords }))
}

/// POST /api/resumes/:id/analysis
///
/// Scores a stored resume against keywords (given inline or taken from a
/// stored job description) and returns the match, ATS score and tips.
/// With neither, the ATS score falls back to the skills count.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidJson(request): ValidJson<ResumeAnalysisRequest>,
) -> Result<Json<ResumeAnalysisResponse>, AppError> {
    let resume_id = parse_id(&raw_id, "resume ID")?;
    let resume = state
        .store
        .get_resume(resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    let keywords = match (request.keywords, request.job_description_id) {
        (Some(keywords), _) => keywords,
        (None, Some(jd_id)) => {
            state
                .store
                .get_job_description(jd_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Job description not found".to_string()))?
                .analyzed_keywords
        }
        (None, None) => Vec::new(),
    };

    let keyword_match = analyze_resume_against_keywords(&resume, &keywords);
    let signals = ProfileSignals::from_resume(&resume, Some(&keyword_match));
    let ats_score = compute_ats_score(&signals);
    let suggestions = generate_suggestions(&resume, &keyword_match);

    debug!(
        resume_id,
        ats_score,
        match_score = keyword_match.score,
        "Analyzed resume"
    );

    Ok(Json(ResumeAnalysisResponse {
        keywords,
        keyword_match,
        ats_score,
        suggestions,
    }))
}
