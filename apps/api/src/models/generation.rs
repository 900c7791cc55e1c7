use serde::{Deserialize, Serialize};

use crate::generation::tone::Tone;

/// Body of `POST {backend}/generate`. Built once per submission and sent verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub resume_text: String,
    pub job_text: String,
    pub tone: Tone,
}

/// Successful backend reply. Absent or `null` fields default to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tailored_resume: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cover_letter: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
