//! Word-compatible document export.
//!
//! The output is HTML with Office namespaces and a UTF-8 byte order mark,
//! which word processors open as a `.doc`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::error::ExportError;

pub const DEFAULT_DOCUMENT_NAME: &str = "PhotoPoet-Poem";

/// Plain-text form used for copy and share:
/// `"{title}\n\n" + "Inspiration: {inspiration}\n\n" + poem`, parts omitted when absent.
pub fn share_text(title: Option<&str>, inspiration: Option<&str>, poem: &str) -> String {
    let mut out = String::new();
    if let Some(title) = non_blank(title) {
        out.push_str(title);
        out.push_str("\n\n");
    }
    if let Some(inspiration) = non_blank(inspiration) {
        out.push_str("Inspiration: ");
        out.push_str(inspiration);
        out.push_str("\n\n");
    }
    out.push_str(poem);
    out
}

const DOCUMENT_STYLE: &str = "\
body { font-family: 'Georgia', serif; line-height: 1.6; color: #1a1a1a; }
.header { text-align: center; border-bottom: 2pt solid #064e3b; padding-bottom: 10pt; margin-bottom: 20pt; }
.title-main { font-size: 28pt; color: #064e3b; margin-bottom: 0; }
.poem-title { font-size: 22pt; color: #065f46; text-align: center; margin-bottom: 10pt; font-weight: bold; }
.subtitle { font-size: 12pt; color: #065f46; font-style: italic; }
.section-title { font-size: 14pt; color: #065f46; font-weight: bold; margin-top: 20pt; border-bottom: 1pt solid #eee; }
.inspiration-box { background-color: #f0fdf4; border: 1pt solid #c1d4bb; padding: 15pt; margin-top: 10pt; font-style: italic; }
.poem-content { font-size: 16pt; margin-top: 20pt; color: #000; text-align: center; }
.footer { margin-top: 50pt; text-align: center; font-size: 9pt; color: #9ca3af; border-top: 1pt solid #eee; padding-top: 10pt; }";

/// Full document text, BOM included. All user text is escaped.
pub fn render_document(
    title: Option<&str>,
    inspiration: Option<&str>,
    poem: &str,
    date: DateTime<Local>,
) -> String {
    let mut body = String::new();
    body.push_str(
        "<div class=\"header\">\n\
         <h1 class=\"title-main\">PhotoPoet</h1>\n\
         <p class=\"subtitle\">Where your moments find their voice</p>\n\
         </div>\n",
    );
    if let Some(title) = non_blank(title) {
        body.push_str(&format!(
            "<div class=\"poem-title\">{}</div>\n",
            escape_html(title)
        ));
    }
    if let Some(inspiration) = non_blank(inspiration) {
        body.push_str(&format!(
            "<div class=\"section-title\">The Inspiration</div>\n\
             <div class=\"inspiration-box\">&ldquo;{}&rdquo;</div>\n",
            escape_html(inspiration)
        ));
    }
    let lines: Vec<String> = poem.lines().map(escape_html).collect();
    body.push_str(&format!(
        "<div class=\"section-title\">The Composition</div>\n\
         <div class=\"poem-content\">{}</div>\n",
        lines.join("<br>")
    ));
    body.push_str(&format!(
        "<div class=\"footer\">Generated with PhotoPoet &bull; {}</div>\n",
        date.format("%B %-d, %Y")
    ));

    format!(
        "\u{feff}<html xmlns:o='urn:schemas-microsoft-com:office:office' \
         xmlns:w='urn:schemas-microsoft-com:office:word' \
         xmlns='http://www.w3.org/TR/REC-html40'>\n\
         <head>\n<meta charset='utf-8'>\n<title>PhotoPoet Composition</title>\n\
         <style>\n{}\n</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        DOCUMENT_STYLE, body
    )
}

/// `<title>.doc` with path-hostile characters replaced, or the default name.
pub fn document_file_name(title: Option<&str>) -> String {
    let sanitized: String = non_blank(title)
        .map(|t| {
            t.chars()
                .map(|c| match c {
                    '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
                    c if c.is_control() => '-',
                    c => c,
                })
                .collect::<String>()
        })
        .map(|s| s.trim().trim_matches('.').trim().to_string())
        .unwrap_or_default();

    let stem = if sanitized.is_empty() {
        DEFAULT_DOCUMENT_NAME
    } else {
        sanitized.as_str()
    };
    format!("{}.doc", stem)
}

/// Write the rendered document into `dir` and return its path.
///
/// An existing file of the same name gets a numeric suffix instead of
/// being overwritten.
pub fn export_document(
    dir: &Path,
    title: Option<&str>,
    inspiration: Option<&str>,
    poem: &str,
    date: DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = unique_path(dir, &document_file_name(title));
    let content = render_document(title, inspiration, poem, date);
    fs::write(&path, content).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Exported document");
    Ok(path)
}

fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }
    let stem = file_name.trim_end_matches(".doc");
    (2..)
        .map(|n| dir.join(format!("{} ({}).doc", stem, n)))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
