//! Browser-facing routes: the form, its submission, and the plain-text downloads.
//!
//! Failures never leave the form: the page is re-rendered with the user's inputs
//! and an error banner, so they can fix the problem and submit again.

pub mod multipart;
pub mod views;

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::info;

use crate::generation::pipeline::{resolve_backend_url, run_submission, SubmissionForm};
use crate::state::AppState;
use crate::web::views::{render_page, FormView, Page};

/// Which generated text a download carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DownloadKind {
    Resume,
    CoverLetter,
}

impl DownloadKind {
    pub fn file_name(self) -> &'static str {
        match self {
            DownloadKind::Resume => "resume_tailored.txt",
            DownloadKind::CoverLetter => "cover_letter.txt",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            DownloadKind::Resume => "resume",
            DownloadKind::CoverLetter => "cover-letter",
        }
    }

    pub fn download_path(self) -> String {
        format!("/download/{}", self.slug())
    }
}

#[derive(Debug, Deserialize)]
pub struct DownloadForm {
    #[serde(default)]
    pub content: String,
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&Page {
        form: FormView {
            backend_url: state.default_backend_url().unwrap_or_default().to_string(),
            ..FormView::default()
        },
        ..Page::default()
    }))
}

/// POST /generate
///
/// Multipart form submission. Renders the result page, or the form again with an error.
pub async fn handle_submit(State(state): State<AppState>, multipart: Multipart) -> Response {
    let mut form = SubmissionForm::default();
    let parsed = multipart::read_submission_into(multipart, &mut form).await;

    let echoed = FormView {
        backend_url: resolve_backend_url(form.backend_url.as_deref(), state.default_backend_url())
            .unwrap_or_default(),
        job_text: form.job_text.clone(),
        tone: form.tone().unwrap_or_default(),
    };

    if let Err(e) = parsed {
        let page = Page {
            form: echoed,
            error: Some(e.user_message()),
            outcome: None,
        };
        return (e.status_code(), Html(render_page(&page))).into_response();
    }

    match run_submission(state.backend.as_ref(), state.default_backend_url(), form).await {
        Ok(outcome) => {
            info!(
                resume_chars = outcome.resume_chars,
                tailored_chars = outcome.tailored_resume.len(),
                cover_letter_chars = outcome.cover_letter.len(),
                "Rendering generated texts"
            );
            Html(render_page(&Page {
                form: echoed,
                error: None,
                outcome: Some(outcome),
            }))
            .into_response()
        }
        Err(e) => {
            let status = e.status_code();
            let page = Page {
                form: echoed,
                error: Some(e.user_message()),
                outcome: None,
            };
            (status, Html(render_page(&page))).into_response()
        }
    }
}

/// POST /download/:kind
///
/// Returns the (possibly edited) textarea content as a plain-text attachment.
pub async fn handle_download(
    Path(kind): Path<DownloadKind>,
    Form(form): Form<DownloadForm>,
) -> impl IntoResponse {
    info!(file = kind.file_name(), bytes = form.content.len(), "Serving download");
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", kind.file_name()),
            ),
        ],
        form.content,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_file_names() {
        assert_eq!(DownloadKind::Resume.file_name(), "resume_tailored.txt");
        assert_eq!(DownloadKind::CoverLetter.file_name(), "cover_letter.txt");
    }

    #[test]
    fn test_download_paths_match_slug_deserialization() {
        for kind in [DownloadKind::Resume, DownloadKind::CoverLetter] {
            let parsed: DownloadKind =
                serde_json::from_value(serde_json::Value::String(kind.slug().to_string())).unwrap();
            assert_eq!(parsed, kind);
            assert_eq!(kind.download_path(), format!("/download/{}", kind.slug()));
        }
    }
}
