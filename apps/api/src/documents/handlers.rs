//! PDF upload and text extraction.

use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extractors::ValidMultipart;

const PDF_FIELD: &str = "pdf";

#[derive(Debug, Serialize)]
pub struct ExtractedPdf {
    pub text: String,
    pub info: PdfInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfInfo {
    pub filename: Option<String>,
    pub size_bytes: usize,
    pub word_count: usize,
}

/// POST /api/extract-pdf
///
/// Accepts `multipart/form-data` with the file in the `pdf` field and returns its text.
pub async fn handle_extract_pdf(
    ValidMultipart(mut multipart): ValidMultipart,
) -> Result<Json<ExtractedPdf>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(PDF_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let data = field.bytes().await?;
        if data.is_empty() {
            return Err(AppError::Validation("Uploaded PDF is empty".to_string()));
        }

        let size_bytes = data.len();
        let text = extract_text(data.to_vec()).await?;
        let word_count = text.split_whitespace().count();
        info!(size_bytes, word_count, "Extracted text from PDF");

        return Ok(Json(ExtractedPdf {
            text,
            info: PdfInfo {
                filename,
                size_bytes,
                word_count,
            },
        }));
    }

    Err(AppError::Validation("No PDF file uploaded".to_string()))
}

/// Runs the extraction off the async runtime. The parser can panic on
/// malformed input, so a panicked task is reported as an unreadable file.
async fn extract_text(data: Vec<u8>) -> Result<String, AppError> {
    let outcome = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await;

    match outcome {
        Ok(Ok(text)) => Ok(text.trim().to_string()),
        Ok(Err(e)) => {
            warn!("PDF extraction failed: {e:?}");
            Err(AppError::Validation(
                "Failed to extract text from PDF".to_string(),
            ))
        }
        Err(e) if e.is_panic() => {
            warn!("PDF parser panicked on upload");
            Err(AppError::Validation(
                "Failed to extract text from PDF".to_string(),
            ))
        }
        Err(e) => Err(AppError::Internal(e.into())),
    }
}
