//! DOCX extraction: paragraph text from `word/document.xml`, in document order.

use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Returns the text of every paragraph joined with `\n`.
pub fn extract_docx_text(raw_bytes: &[u8]) -> Result<String> {
    let mut archive =
        ZipArchive::new(Cursor::new(raw_bytes)).context("not a valid DOCX (zip) container")?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .with_context(|| format!("DOCX is missing {DOCUMENT_PART}"))?
        .read_to_string(&mut xml)
        .with_context(|| format!("failed to read {DOCUMENT_PART}"))?;

    let paragraphs = parse_paragraphs(&xml)?;
    Ok(paragraphs.join("\n"))
}

/// Walks WordprocessingML and returns one string per `w:p`.
///
/// Only run content counts: `w:t` contributes its text, `w:tab` a tab and
/// `w:br`/`w:cr` a line break. Tab stops under `w:pPr` are ignored.
/// Paragraphs nested in text boxes are folded into the enclosing paragraph on
/// their own line; the `mc:Fallback` copy of a text box is skipped.
fn parse_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut paragraph_depth = 0usize;
    let mut run_depth = 0usize;
    let mut fallback_depth = 0usize;
    let mut in_text_run = false;

    loop {
        let event = reader
            .read_event()
            .with_context(|| format!("malformed XML at byte {}", reader.buffer_position()))?;

        if fallback_depth > 0 {
            match event {
                Event::Start(_) => fallback_depth += 1,
                Event::End(_) => fallback_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"mc:Fallback" => fallback_depth = 1,
                b"w:p" => {
                    if paragraph_depth > 0 {
                        end_line(&mut current);
                    }
                    paragraph_depth += 1;
                }
                b"w:r" => run_depth += 1,
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                    if paragraph_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    } else {
                        end_line(&mut current);
                    }
                }
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:t" => in_text_run = false,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" if paragraph_depth == 0 => paragraphs.push(String::new()),
                b"w:tab" if run_depth > 0 => current.push('\t'),
                b"w:br" | b"w:cr" if run_depth > 0 => current.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text_run && paragraph_depth > 0 => {
                let text = t.unescape().context("invalid XML escape in w:t")?;
                current.push_str(&text);
            }
            Event::CData(t) if in_text_run && paragraph_depth > 0 => {
                current.push_str(&String::from_utf8_lossy(&t));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Starts a new line unless `text` is empty or already ends one.
fn end_line(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}
