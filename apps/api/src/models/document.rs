use bytes::Bytes;

/// A file as uploaded by the user for one submission.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub raw_bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, raw_bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            raw_bytes: raw_bytes.into(),
        }
    }

    /// Browsers send an empty file part when nothing was chosen.
    pub fn is_empty_part(&self) -> bool {
        self.filename.trim().is_empty() && self.raw_bytes.is_empty()
    }
}
