//! Submission pipeline: validation and extraction, then one backend call.
//!
//! Checks run in a fixed order and each one short-circuits: a missing backend URL
//! never reaches extraction, and an unreadable resume never reaches the network.

use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::backend_client::GenerationBackend;
use crate::errors::AppError;
use crate::extraction::{self, Extraction};
use crate::generation::tone::{Tone, UnknownTone};
use crate::models::document::UploadedDocument;
use crate::models::generation::GenerationRequest;

pub const MISSING_BACKEND_URL: &str = "Please enter your Backend URL first.";
pub const MISSING_INPUTS: &str = "Please upload a resume and paste the job description.";
pub const UNREADABLE_RESUME: &str =
    "Could not read text from the resume. Try uploading a TXT or DOCX.";

/// One user submission, as parsed from the form.
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub backend_url: Option<String>,
    pub job_text: String,
    /// Raw form value; parsed by [`SubmissionForm::tone`] once the URL check has passed.
    pub tone: Option<String>,
    pub document: Option<UploadedDocument>,
}

impl SubmissionForm {
    /// The selected tone. Missing or blank means the default.
    pub fn tone(&self) -> Result<Tone, UnknownTone> {
        match self.tone.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse(),
            _ => Ok(Tone::default()),
        }
    }
}

/// What the pipeline hands back to the surface. Both texts are trimmed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOutcome {
    pub tailored_resume: String,
    pub cover_letter: String,
    #[serde(skip)]
    pub resume_chars: usize,
}

/// The form's URL if it has one, otherwise the configured default.
pub fn resolve_backend_url(form_value: Option<&str>, default: Option<&str>) -> Option<String> {
    form_value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| default.map(str::trim).filter(|v| !v.is_empty()))
        .map(String::from)
}

/// Runs extraction off the async runtime; parsing large PDFs is CPU-bound.
pub async fn extract_document(document: UploadedDocument) -> Result<Extraction, AppError> {
    tokio::task::spawn_blocking(move || {
        extraction::extract(&document.filename, &document.raw_bytes)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))
}

pub async fn run_submission(
    backend: &dyn GenerationBackend,
    default_backend_url: Option<&str>,
    form: SubmissionForm,
) -> Result<GenerationOutcome, AppError> {
    let submission_id = Uuid::new_v4();
    let span = info_span!(
        "submission",
        %submission_id,
        tone = form.tone.as_deref().unwrap_or_default()
    );

    async move {
        let backend_url = resolve_backend_url(form.backend_url.as_deref(), default_backend_url)
            .ok_or_else(|| AppError::Configuration(MISSING_BACKEND_URL.to_string()))?;
        let tone = form
            .tone()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let job_text = form.job_text.trim();
        let document = match form.document {
            Some(doc) if !doc.is_empty_part() && !job_text.is_empty() => doc,
            _ => return Err(AppError::Validation(MISSING_INPUTS.to_string())),
        };

        let filename = document.filename.clone();
        let extraction = extract_document(document).await?;
        let resume_text = match extraction.usable_text() {
            Some(text) => text.to_string(),
            None => {
                match &extraction {
                    Extraction::Unreadable { reason } => {
                        warn!(%filename, %reason, "Uploaded resume could not be parsed")
                    }
                    Extraction::Text(_) => warn!(%filename, "Uploaded resume contained no text"),
                }
                return Err(AppError::Extraction(UNREADABLE_RESUME.to_string()));
            }
        };

        let request = GenerationRequest {
            resume_text,
            job_text: job_text.to_string(),
            tone,
        };
        info!(
            resume_chars = request.resume_text.len(),
            job_chars = request.job_text.len(),
            "Submitting to backend"
        );

        let response = backend.submit(&backend_url, &request).await?;

        Ok(GenerationOutcome {
            tailored_resume: response.tailored_resume.trim().to_string(),
            cover_letter: response.cover_letter.trim().to_string(),
            resume_chars: request.resume_text.len(),
        })
    }
    .instrument(span)
    .await
}
