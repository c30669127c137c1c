use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored job description together with the keywords extracted from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescription {
    pub id: u64,
    pub user_id: Option<u64>,
    pub content: String,
    pub analyzed_keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/job-descriptions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJobDescription {
    #[serde(default)]
    pub user_id: Option<u64>,
    pub content: String,
}
