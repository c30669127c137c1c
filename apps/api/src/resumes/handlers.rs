//! Axum route handlers for the Resume API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::errors::AppError;
use crate::extractors::{parse_id, UserIdQuery, ValidJson, ValidQuery};
use crate::models::resume::{BasicInfo, Education, Experience, NewResume, Resume, ResumePatch};
use crate::state::AppState;

fn resume_not_found() -> AppError {
    AppError::NotFound("Resume not found".to_string())
}

fn found(resume: Option<Resume>, missing: &str) -> Result<Json<Resume>, AppError> {
    resume
        .map(Json)
        .ok_or_else(|| AppError::NotFound(missing.to_string()))
}

/// GET /api/resumes?userId=
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<UserIdQuery>,
) -> Result<Json<Vec<Resume>>, AppError> {
    let user_id = query.parse()?;
    Ok(Json(state.store.list_resumes(user_id).await?))
}

/// GET /api/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Resume>, AppError> {
    let id = parse_id(&raw_id, "resume ID")?;
    state
        .store
        .get_resume(id)
        .await?
        .map(Json)
        .ok_or_else(resume_not_found)
}

/// POST /api/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    ValidJson(new): ValidJson<NewResume>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    new.validate()?;
    let resume = state.store.create_resume(new).await?;
    Ok((StatusCode::CREATED, Json(resume)))
}

/// PUT /api/resumes/:id
///
/// Merges the supplied fields into the stored resume.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidJson(patch): ValidJson<ResumePatch>,
) -> Result<Json<Resume>, AppError> {
    let id = parse_id(&raw_id, "resume ID")?;
    found(state.store.update_resume(id, patch).await?, "Resume not found")
}

/// DELETE /api/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&raw_id, "resume ID")?;
    if state.store.delete_resume(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(resume_not_found())
    }
}

/// POST /api/resumes/:id/experiences
pub async fn handle_add_experience(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidJson(experience): ValidJson<Experience>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let id = parse_id(&raw_id, "resume ID")?;
    experience.validate()?;
    let resume = found(
        state.store.add_experience(id, experience).await?,
        "Resume not found",
    )?;
    Ok((StatusCode::CREATED, resume))
}

/// PUT /api/resumes/:resume_id/experiences/:experience_id
pub async fn handle_update_experience(
    State(state): State<AppState>,
    Path((raw_id, experience_id)): Path<(String, String)>,
    ValidJson(experience): ValidJson<Experience>,
) -> Result<Json<Resume>, AppError> {
    let id = parse_id(&raw_id, "resume ID")?;
    experience.validate()?;
    found(
        state
            .store
            .update_experience(id, &experience_id, experience)
            .await?,
        "Resume or experience not found",
    )
}

/// DELETE /api/resumes/:resume_id/experiences/:experience_id
pub async fn handle_remove_experience(
    State(state): State<AppState>,
    Path((raw_id, experience_id)): Path<(String, String)>,
) -> Result<Json<Resume>, AppError> {
    let id = parse_id(&raw_id, "resume ID")?;
    found(
        state.store.remove_experience(id, &experience_id).await?,
        "Resume or experience not found",
    )
}

/// POST /api/resumes/:id/education
pub async fn handle_add_education(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidJson(education): ValidJson<Education>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let id = parse_id(&raw_id, "resume ID")?;
    education.validate()?;
    let resume = found(
        state.store.add_education(id, education).await?,
        "Resume not found",
    )?;
    Ok((StatusCode::CREATED, resume))
}

/// PUT /api/resumes/:resume_id/education/:education_id
pub async fn handle_update_education(
    State(state): State<AppState>,
    Path((raw_id, education_id)): Path<(String, String)>,
    ValidJson(education): ValidJson<Education>,
) -> Result<Json<Resume>, AppError> {
    let id = parse_id(&raw_id, "resume ID")?;
    education.validate()?;
    found(
        state
            .store
            .update_education(id, &education_id, education)
            .await?,
        "Resume or education not found",
    )
}

/// DELETE /api/resumes/:resume_id/education/:education_id
pub async fn handle_remove_education(
    State(state): State<AppState>,
    Path((raw_id, education_id)): Path<(String, String)>,
) -> Result<Json<Resume>, AppError> {
    let id = parse_id(&raw_id, "resume ID")?;
    found(
        state.store.remove_education(id, &education_id).await?,
        "Resume or education not found",
    )
}

/// PUT /api/resumes/:id/basic-info
pub async fn handle_update_basic_info(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidJson(basic_info): ValidJson<BasicInfo>,
) -> Result<Json<Resume>, AppError> {
    let id = parse_id(&raw_id, "resume ID")?;
    basic_info.validate()?;
    found(
        state.store.update_basic_info(id, basic_info).await?,
        "Resume not found",
    )
}

/// PUT /api/resumes/:id/skills
///
/// Body: `{ "skills": [string] }`.
pub async fn handle_update_skills(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidJson(body): ValidJson<Value>,
) -> Result<Json<Resume>, AppError> {
    let id = parse_id(&raw_id, "resume ID")?;
    let skills = match body.get("skills") {
        Some(value @ Value::Array(_)) => serde_json::from_value::<Vec<String>>(value.clone())
            .map_err(|_| AppError::Validation("Skills must be an array of strings".to_string()))?,
        _ => return Err(AppError::Validation("Skills must be an array".to_string())),
    };
    found(state.store.update_skills(id, skills).await?, "Resume not found")
}

/// PUT /api/resumes/:id/summary
///
/// Body: `{ "summary": string }`.
pub async fn handle_update_summary(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidJson(body): ValidJson<Value>,
) -> Result<Json<Resume>, AppError> {
    let id = parse_id(&raw_id, "resume ID")?;
    let summary = body
        .get("summary")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Validation("Summary must be a string".to_string()))?
        .to_string();
    found(state.store.update_summary(id, summary).await?, "Resume not found")
}
