//! Axum route handlers for the JSON API.
//!
//! Same multipart fields as the browser form; errors use the JSON envelope from `AppError`.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::extraction::{DocumentKind, Extraction};
use crate::generation::pipeline::{extract_document, run_submission, GenerationOutcome};
use crate::state::AppState;
use crate::web::multipart::read_submission;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub filename: String,
    pub kind: DocumentKind,
    pub readable: bool,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// POST /api/v1/extract
///
/// Returns the text extracted from the `resume` file without calling the backend.
/// An unreadable file is a successful response with `readable: false`.
pub async fn handle_extract(multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let form = read_submission(multipart).await?;
    let document = form
        .document
        .ok_or_else(|| AppError::Validation("Please upload a resume file.".to_string()))?;

    let filename = document.filename.clone();
    let kind = DocumentKind::from_filename(&filename);
    let extraction = extract_document(document).await?;
    let readable = extraction.is_readable();
    let (text, reason) = match extraction {
        Extraction::Text(text) => (text, None),
        Extraction::Unreadable { reason } => (String::new(), Some(reason)),
    };

    Ok(Json(ExtractResponse {
        filename,
        kind,
        readable,
        text,
        reason,
    }))
}

/// POST /api/v1/generate
///
/// Full pipeline: validate → extract → one backend call. Returns the trimmed texts.
pub async fn handle_generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerationOutcome>, AppError> {
    let form = read_submission(multipart).await?;
    let outcome = run_submission(state.backend.as_ref(), state.default_backend_url(), form).await?;
    Ok(Json(outcome))
}
