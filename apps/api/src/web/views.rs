//! Server-rendered HTML for the form and result pages.
//!
//! Every user-supplied or backend-supplied string goes through `html_escape`
//! before it is written into the page.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::generation::pipeline::GenerationOutcome;
use crate::generation::tone::Tone;
use crate::web::multipart::{FIELD_BACKEND_URL, FIELD_JOB_TEXT, FIELD_RESUME, FIELD_TONE};
use crate::web::DownloadKind;

const PLACEHOLDER_BACKEND_URL: &str = "https://resume-ai-backend.onrender.com";

/// The non-file inputs echoed back into the form after a submission.
#[derive(Debug, Clone, Default)]
pub struct FormView {
    pub backend_url: String,
    pub job_text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub form: FormView,
    pub error: Option<String>,
    pub outcome: Option<GenerationOutcome>,
}

pub fn render_page(page: &Page) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AI Resume &amp; Cover Letter</title>
<style>
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 1200px; padding: 0 1rem; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 1.5rem; }
label { display: block; font-weight: 600; margin: 1rem 0 .25rem; }
input[type=url], select, textarea { width: 100%; box-sizing: border-box; }
.info { background: #eef5ff; padding: .75rem 1rem; border-radius: 4px; }
.error { background: #fdecea; color: #7a1c14; padding: .75rem 1rem; border-radius: 4px; white-space: pre-wrap; }
button { margin-top: 1rem; padding: .6rem 1.2rem; }
</style>
</head>
<body>
<h1>AI Resume &amp; Cover Letter Generator</h1>
<p>Upload your resume and paste a job description. This app calls your generation backend.</p>
"#,
    );

    render_form(&mut html, &page.form);

    if let Some(error) = &page.error {
        let _ = writeln!(html, r#"<div class="error" role="alert">{}</div>"#, encode_text(error));
    }

    if let Some(outcome) = &page.outcome {
        render_outcome(&mut html, outcome);
    }

    html.push_str(
        "<hr>\n<p><small>Tip: set BACKEND_URL in the server environment so the URL box is pre-filled.</small></p>\n</body>\n</html>\n",
    );
    html
}

fn render_form(html: &mut String, form: &FormView) {
    let _ = write!(
        html,
        r#"<form method="post" action="/generate" enctype="multipart/form-data">
<label for="{url}">Backend URL</label>
<input type="url" id="{url}" name="{url}" value="{url_value}" placeholder="{placeholder}">
"#,
        url = FIELD_BACKEND_URL,
        url_value = encode_double_quoted_attribute(&form.backend_url),
        placeholder = PLACEHOLDER_BACKEND_URL,
    );

    if form.backend_url.trim().is_empty() {
        html.push_str(r#"<p class="info">Enter your backend URL.</p>"#);
        html.push('\n');
    }

    let _ = writeln!(html, r#"<label for="{FIELD_TONE}">Cover letter tone</label>"#);
    let _ = writeln!(html, r#"<select id="{FIELD_TONE}" name="{FIELD_TONE}">"#);
    for tone in Tone::ALL {
        let selected = if tone == form.tone { " selected" } else { "" };
        let _ = writeln!(html, r#"<option value="{tone}"{selected}>{tone}</option>"#);
    }
    html.push_str("</select>\n");

    let _ = write!(
        html,
        r#"<div class="columns">
<div>
<label for="{resume}">Upload resume (PDF/DOCX/TXT)</label>
<input type="file" id="{resume}" name="{resume}" accept=".pdf,.docx,.txt">
</div>
<div>
<label for="{job}">Paste the job description</label>
<textarea id="{job}" name="{job}" rows="12">{job_value}</textarea>
</div>
</div>
<button type="submit">Generate</button>
</form>
"#,
        resume = FIELD_RESUME,
        job = FIELD_JOB_TEXT,
        job_value = encode_text(&form.job_text),
    );
}

fn render_outcome(html: &mut String, outcome: &GenerationOutcome) {
    html.push_str("<div class=\"columns\">\n");
    render_download_column(html, "Tailored Resume", DownloadKind::Resume, &outcome.tailored_resume);
    render_download_column(html, "Cover Letter", DownloadKind::CoverLetter, &outcome.cover_letter);
    html.push_str("</div>\n");
}

/// An editable textarea inside its own form, so the download carries the user's edits.
fn render_download_column(html: &mut String, title: &str, kind: DownloadKind, text: &str) {
    let _ = write!(
        html,
        r#"<section>
<h2>{title}</h2>
<form method="post" action="{action}">
<label for="{id}">{title} (editable)</label>
<textarea id="{id}" name="content" rows="25">{text}</textarea>
<button type="submit">Download {title} (.txt)</button>
</form>
</section>
"#,
        action = kind.download_path(),
        id = kind.slug(),
        text = encode_text(text),
    );
}
