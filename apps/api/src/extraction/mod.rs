//! Text extraction. Turns an uploaded resume (PDF, DOCX or plain text) into plain text.
//!
//! `extract` never fails and never panics. It returns an [`Extraction`] that keeps
//! "the file could not be read" apart from "the file was read but had no text",
//! so callers can report each case without guessing.

pub mod docx;
pub mod pdf;
pub mod text;

use serde::Serialize;
use tracing::{debug, warn};

/// Document format, chosen from the filename suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// `.pdf` and `.docx` are matched case-insensitively; everything else is plain text.
    pub fn from_filename(filename: &str) -> Self {
        let name = filename.trim().to_lowercase();
        if name.ends_with(".pdf") {
            DocumentKind::Pdf
        } else if name.ends_with(".docx") {
            DocumentKind::Docx
        } else {
            DocumentKind::PlainText
        }
    }
}

/// Outcome of extracting text from one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Text was extracted. May be empty or whitespace-only.
    Text(String),
    /// The file could not be parsed as its declared format.
    Unreadable { reason: String },
}

impl Extraction {
    /// The extracted text if it contains anything besides whitespace.
    pub fn usable_text(&self) -> Option<&str> {
        match self {
            Extraction::Text(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        }
    }

    pub fn is_readable(&self) -> bool {
        matches!(self, Extraction::Text(_))
    }
}

/// Extracts plain text from `raw_bytes`, dispatching on the extension of `filename`.
pub fn extract(filename: &str, raw_bytes: &[u8]) -> Extraction {
    let kind = DocumentKind::from_filename(filename);

    let result = match kind {
        DocumentKind::Pdf => pdf::extract_pdf_text(raw_bytes),
        DocumentKind::Docx => docx::extract_docx_text(raw_bytes),
        DocumentKind::PlainText => Ok(text::decode_text(raw_bytes)),
    };

    match result {
        Ok(text) => {
            debug!(?kind, bytes = raw_bytes.len(), chars = text.len(), "Extracted text");
            Extraction::Text(text)
        }
        Err(e) => {
            warn!(?kind, bytes = raw_bytes.len(), "Could not read uploaded document: {e:#}");
            Extraction::Unreadable {
                reason: format!("{e:#}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(DocumentKind::from_filename("cv.pdf"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("CV.PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("cv.DocX"), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_filename("cv.txt"), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_filename("cv.doc"), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_filename("pdf"), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_filename(""), DocumentKind::PlainText);
    }

    #[test]
    fn test_plain_text_round_trips_unchanged() {
        let text = "Jane Doe\nSenior Engineer\n\n• Rust, Go — café ✓\n";
        assert_eq!(
            extract("resume.txt", text.as_bytes()),
            Extraction::Text(text.to_string())
        );
        // Unknown extensions are decoded as text too.
        assert_eq!(
            extract("resume.md", text.as_bytes()),
            Extraction::Text(text.to_string())
        );
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let bytes = b"Jane \xff\xfe Doe";
        let extraction = extract("resume", bytes);
        let text = extraction.usable_text().expect("lossy text should be usable");
        assert!(text.starts_with("Jane "));
        assert!(text.ends_with(" Doe"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_corrupt_docx_is_unreadable_not_empty() {
        let extraction = extract("resume.docx", b"definitely not a zip archive");
        assert!(!extraction.is_readable());
        assert!(extraction.usable_text().is_none());
        match extraction {
            Extraction::Unreadable { reason } => assert!(!reason.is_empty()),
            other => panic!("expected Unreadable, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_pdf_is_unreadable() {
        let extraction = extract("resume.pdf", b"%PDF-1.4 garbage without any objects");
        assert!(!extraction.is_readable());
        assert!(extraction.usable_text().is_none());
    }

    #[test]
    fn test_whitespace_only_text_is_readable_but_not_usable() {
        let extraction = extract("blank.txt", b"  \n\t ");
        assert!(extraction.is_readable());
        assert!(extraction.usable_text().is_none());
    }

    #[test]
    fn test_empty_file_is_readable_but_not_usable() {
        let extraction = extract("empty.txt", b"");
        assert_eq!(extraction, Extraction::Text(String::new()));
        assert!(extraction.usable_text().is_none());
    }
}
