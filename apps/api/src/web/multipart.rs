use axum::extract::Multipart;
use tracing::debug;

use crate::errors::AppError;
use crate::generation::pipeline::SubmissionForm;
use crate::models::document::UploadedDocument;

pub const FIELD_BACKEND_URL: &str = "backend_url";
pub const FIELD_RESUME: &str = "resume";
pub const FIELD_JOB_TEXT: &str = "job_text";
pub const FIELD_TONE: &str = "tone";

fn bad_form(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Invalid form submission: {}", e.body_text()))
}

/// Reads the submission form. Unknown fields are ignored; an empty file part means "no file".
pub async fn read_submission(multipart: Multipart) -> Result<SubmissionForm, AppError> {
    let mut form = SubmissionForm::default();
    read_submission_into(multipart, &mut form).await?;
    Ok(form)
}

/// Like [`read_submission`], but fills `form` in place so the fields read before
/// a failure are still available to echo back.
pub async fn read_submission_into(
    mut multipart: Multipart,
    form: &mut SubmissionForm,
) -> Result<(), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(bad_form)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FIELD_BACKEND_URL => form.backend_url = Some(field.text().await.map_err(bad_form)?),
            FIELD_JOB_TEXT => form.job_text = field.text().await.map_err(bad_form)?,
            FIELD_TONE => form.tone = Some(field.text().await.map_err(bad_form)?),
            FIELD_RESUME => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(bad_form)?;
                let document = UploadedDocument::new(filename, bytes);
                form.document = (!document.is_empty_part()).then_some(document);
            }
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(())
}
