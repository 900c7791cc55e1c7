//! PDF extraction: page text joined with newlines, tolerant of pages that fail.
//!
//! `pdf-extract` handles font encodings best but fails (or panics) on the whole
//! document when any page is broken. In that case we fall back to `lopdf`, one
//! page at a time, so a bad page costs only its own text.

use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, warn};

pub fn extract_pdf_text(raw_bytes: &[u8]) -> Result<String> {
    match pages_via_pdf_extract(raw_bytes) {
        Ok(pages) if pages.iter().any(|p| !p.trim().is_empty()) => {
            return Ok(join_pages(pages.into_iter().map(Ok::<_, String>)));
        }
        Ok(pages) => debug!(pages = pages.len(), "pdf-extract found no text, trying lopdf"),
        Err(e) => debug!("pdf-extract failed, trying lopdf page by page: {e:#}"),
    }

    extract_with_lopdf(raw_bytes)
}

fn pages_via_pdf_extract(raw_bytes: &[u8]) -> Result<Vec<String>> {
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(raw_bytes)) {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(anyhow!("pdf-extract error: {e:?}")),
        Err(_) => bail!("pdf-extract panicked while reading the document"),
    }
}

fn extract_with_lopdf(raw_bytes: &[u8]) -> Result<String> {
    let doc = lopdf::Document::load_mem(raw_bytes).context("failed to parse PDF")?;
    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    if page_numbers.is_empty() {
        bail!("PDF contains no pages");
    }

    Ok(join_pages(lopdf_page_texts(&doc, &page_numbers)))
}

/// Text of each requested page; a page that errors or panics becomes `Err`.
fn lopdf_page_texts<'a>(
    doc: &'a lopdf::Document,
    page_numbers: &'a [u32],
) -> impl Iterator<Item = Result<String, String>> + 'a {
    page_numbers.iter().map(move |&n| {
        match panic::catch_unwind(AssertUnwindSafe(|| doc.extract_text(&[n]))) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!("panicked extracting page {n}")),
        }
    })
}

/// Joins page texts with `\n`. A failed page contributes an empty segment.
pub(crate) fn join_pages<E: Display>(pages: impl IntoIterator<Item = Result<String, E>>) -> String {
    pages
        .into_iter()
        .enumerate()
        .map(|(i, page)| match page {
            Ok(text) => text.trim_matches(|c| c == '\n' || c == '\r').to_string(),
            Err(e) => {
                warn!(page = i + 1, "PDF page yielded no text: {e}");
                String::new()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
