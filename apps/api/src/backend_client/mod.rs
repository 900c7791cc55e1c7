//! Backend client: the single point of contact with the external generation service.
//!
//! One POST per submission to `{backend_url}/generate`. No retries: every failure
//! is returned to the caller as a `SubmitError` and surfaced to the user.

use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::generation::{GenerationRequest, GenerationResponse};

pub const GENERATE_PATH: &str = "/generate";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("invalid backend URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("backend did not respond within {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("could not reach backend: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Backend error ({status}): {body}")]
    Remote { status: u16, body: String },

    #[error("backend returned a malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl SubmitError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, SubmitError::Timeout(_))
    }
}

/// Anything that can turn a `GenerationRequest` into a `GenerationResponse`.
///
/// Carried in `AppState` as `Arc<dyn GenerationBackend>` so tests can swap in a fake.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn submit(
        &self,
        backend_url: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, SubmitError>;
}

/// Strips whitespace and every trailing `/`, then appends `/generate`.
pub fn generate_endpoint(backend_url: &str) -> String {
    format!("{}{GENERATE_PATH}", backend_url.trim().trim_end_matches('/'))
}

fn parse_endpoint(backend_url: &str) -> Result<Url, SubmitError> {
    let endpoint = generate_endpoint(backend_url);
    let url = Url::parse(&endpoint).map_err(|e| SubmitError::InvalidUrl {
        url: backend_url.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SubmitError::InvalidUrl {
            url: backend_url.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

/// reqwest-backed `GenerationBackend`.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    timeout: Duration,
}

impl HttpBackend {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, e: reqwest::Error) -> SubmitError {
        if e.is_timeout() {
            SubmitError::Timeout(self.timeout)
        } else {
            SubmitError::Transport(e)
        }
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    async fn submit(
        &self,
        backend_url: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, SubmitError> {
        let url = parse_endpoint(backend_url)?;
        let started = Instant::now();

        let response = self
            .client
            .post(url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if status != StatusCode::OK {
            warn!(%url, status = status.as_u16(), elapsed_ms, "Backend returned an error");
            return Err(SubmitError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerationResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(%url, elapsed_ms, body_bytes = body.len(), "Backend response was not valid JSON");
            SubmitError::Malformed(e)
        })?;

        info!(
            %url,
            elapsed_ms,
            tailored_resume_chars = parsed.tailored_resume.len(),
            cover_letter_chars = parsed.cover_letter.len(),
            "Backend generation succeeded"
        );

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::State,
        http::{StatusCode as AxumStatus, Uri},
        Json, Router,
    };
    use serde_json::{json, Value};

    use crate::generation::tone::Tone;

    fn sample_request() -> GenerationRequest {
        GenerationRequest {
            resume_text: "Jane Doe, Rust engineer".to_string(),
            job_text: "Hiring a Rust engineer".to_string(),
            tone: Tone::Friendly,
        }
    }

    /// Serves `router` on an ephemeral localhost port and returns its base URL.
    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[derive(Clone, Default)]
    struct Recorded {
        calls: Arc<Mutex<Vec<(String, Value)>>>,
    }

    async fn record_and_reply(
        State(recorded): State<Recorded>,
        uri: Uri,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        recorded
            .calls
            .lock()
            .unwrap()
            .push((uri.path().to_string(), body));
        Json(json!({
            "tailored_resume": "Tailored resume",
            "cover_letter": "Dear hiring manager",
        }))
    }

    #[test]
    fn test_generate_endpoint_normalization() {
        assert_eq!(generate_endpoint("https://x.test"), "https://x.test/generate");
        assert_eq!(generate_endpoint("https://x.test/"), "https://x.test/generate");
        assert_eq!(generate_endpoint("https://x.test//"), "https://x.test/generate");
        assert_eq!(
            generate_endpoint("  https://x.test/api/ \n"),
            "https://x.test/api/generate"
        );
    }

    #[test]
    fn test_parse_endpoint_rejects_bad_urls() {
        assert!(matches!(
            parse_endpoint("not a url"),
            Err(SubmitError::InvalidUrl { .. })
        ));
        assert!(matches!(
            parse_endpoint("ftp://x.test"),
            Err(SubmitError::InvalidUrl { .. })
        ));
        assert_eq!(
            parse_endpoint("https://x.test/").unwrap().as_str(),
            "https://x.test/generate"
        );
    }

    #[tokio::test]
    async fn test_posts_json_body_to_generate_path() {
        let recorded = Recorded::default();
        let router = Router::new()
            .fallback(record_and_reply)
            .with_state(recorded.clone());
        let base = spawn_backend(router).await;

        let backend = HttpBackend::new(Duration::from_secs(5)).unwrap();
        let response = backend
            .submit(&format!("{base}/"), &sample_request())
            .await
            .unwrap();

        assert_eq!(response.tailored_resume, "Tailored resume");
        assert_eq!(response.cover_letter, "Dear hiring manager");

        let calls = recorded.calls.lock().unwrap();
        assert_eq!(calls.len(), 1, "exactly one request, no retries");
        assert_eq!(calls[0].0, "/generate");
        assert_eq!(
            calls[0].1,
            json!({
                "resume_text": "Jane Doe, Rust engineer",
                "job_text": "Hiring a Rust engineer",
                "tone": "Friendly",
            })
        );
    }

    #[tokio::test]
    async fn test_non_200_surfaces_status_and_body() {
        let router = Router::new().fallback(|| async {
            (AxumStatus::INTERNAL_SERVER_ERROR, "boom")
        });
        let base = spawn_backend(router).await;

        let backend = HttpBackend::new(Duration::from_secs(5)).unwrap();
        let err = backend.submit(&base, &sample_request()).await.unwrap_err();

        match &err {
            SubmitError::Remote { status, body } => {
                assert_eq!(*status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Remote error, got {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("boom"));
    }

    #[tokio::test]
    async fn test_other_2xx_is_still_an_error() {
        let router = Router::new().fallback(|| async { (AxumStatus::ACCEPTED, "queued") });
        let base = spawn_backend(router).await;

        let backend = HttpBackend::new(Duration::from_secs(5)).unwrap();
        let err = backend.submit(&base, &sample_request()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Remote { status: 202, .. }));
    }

    #[tokio::test]
    async fn test_missing_cover_letter_defaults_to_empty() {
        let router = Router::new().fallback(|| async {
            Json(json!({ "tailored_resume": "Only a resume" }))
        });
        let base = spawn_backend(router).await;

        let backend = HttpBackend::new(Duration::from_secs(5)).unwrap();
        let response = backend.submit(&base, &sample_request()).await.unwrap();
        assert_eq!(response.tailored_resume, "Only a resume");
        assert_eq!(response.cover_letter, "");
    }

    #[tokio::test]
    async fn test_malformed_body_is_classified() {
        let router = Router::new().fallback(|| async { "<html>not json</html>" });
        let base = spawn_backend(router).await;

        let backend = HttpBackend::new(Duration::from_secs(5)).unwrap();
        let err = backend.submit(&base, &sample_request()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Malformed(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_slow_backend_times_out_within_bound() {
        let router = Router::new().fallback(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Json(json!({}))
        });
        let base = spawn_backend(router).await;

        let backend = HttpBackend::new(Duration::from_millis(200)).unwrap();
        let started = Instant::now();
        let err = backend.submit(&base, &sample_request()).await.unwrap_err();

        assert!(err.is_timeout(), "expected timeout, got {err:?}");
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "timeout took {:?}",
            started.elapsed()
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::new(Duration::from_secs(5)).unwrap();
        let err = backend
            .submit(&format!("http://{addr}"), &sample_request())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_invalid_url_never_hits_network() {
        let backend = HttpBackend::new(Duration::from_secs(5)).unwrap();
        let err = backend
            .submit("resume-ai-backend.onrender.com", &sample_request())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::InvalidUrl { .. }));
    }
}
