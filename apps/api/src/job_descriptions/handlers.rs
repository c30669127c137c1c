use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::analysis::keywords::extract_keywords;
use crate::errors::AppError;
use crate::extractors::{parse_id, UserIdQuery, ValidJson, ValidQuery};
use crate::models::job_description::{JobDescription, NewJobDescription};
use crate::models::resume::is_blank;
use crate::state::AppState;

/// POST /api/job-descriptions
///
/// Stores the job description along with the keywords extracted from it.
pub async fn handle_create_job_description(
    State(state): State<AppState>,
    ValidJson(new): ValidJson<NewJobDescription>,
) -> Result<(StatusCode, Json<JobDescription>), AppError> {
    if is_blank(&new.content) {
        return Err(AppError::Validation(
            "Job description content is required".to_string(),
        ));
    }

    let keywords = extract_keywords(&new.content, &state.lexicon);
    let job_description = state.store.create_job_description(new, keywords).await?;
    Ok((StatusCode::CREATED, Json(job_description)))
}

/// GET /api/job-descriptions?userId=
pub async fn handle_list_job_descriptions(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<UserIdQuery>,
) -> Result<Json<Vec<JobDescription>>, AppError> {
    let user_id = query.parse()?;
    Ok(Json(state.store.list_job_descriptions(user_id).await?))
}

/// GET /api/job-descriptions/:id
pub async fn handle_get_job_description(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<JobDescription>, AppError> {
    let id = parse_id(&raw_id, "job description ID")?;
    state
        .store
        .get_job_description(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Job description not found".to_string()))
}
