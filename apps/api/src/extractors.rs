//! Request extractors that report failures in the `{ "message": ... }` shape.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Multipart, Request},
};
use serde::Deserialize;

use crate::errors::AppError;

/// `axum::Json` with its rejection mapped onto `AppError`, so malformed
/// bodies become 400s with a JSON message instead of plain-text 422s.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ValidJson<T>(pub T);

/// `axum::extract::Query` with the same `AppError` rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ValidQuery<T>(pub T);

/// `Multipart` whose rejection (wrong content type, missing boundary)
/// renders as a JSON message.
pub struct ValidMultipart(pub Multipart);

#[async_trait]
impl<S> FromRequest<S> for ValidMultipart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(Multipart::from_request(req, state).await?))
    }
}

/// Parses a numeric path or query identifier; `label` names it in the error.
pub fn parse_id(raw: &str, label: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| AppError::Validation(format!("Invalid {label}")))
}

/// `?userId=` query string. Kept as raw text so a bad value is reported as
/// `Invalid userId` rather than a generic query rejection.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl UserIdQuery {
    pub fn parse(&self) -> Result<u64, AppError> {
        parse_id(self.user_id.as_deref().unwrap_or_default(), "userId")
    }
}
