//! Getting a poem out of the application: clipboard text, a `.doc` file,
//! or a social share link.

mod document;
mod error;
mod share;

pub use document::{
    document_file_name, escape_html, export_document, render_document, share_text,
    DEFAULT_DOCUMENT_NAME,
};
pub use error::ExportError;
pub use share::{open_url, share_url, ShareTarget};

use crate::clipboard::ClipboardHandler;

/// How a share request was fulfilled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Opened,
    /// The opener failed; the link was put on the clipboard instead.
    CopiedLink(String),
}

/// Open the share link for `target`, falling back to copying it.
pub fn share(
    target: ShareTarget,
    title: Option<&str>,
    poem: &str,
    app_url: &str,
    clipboard: Option<&mut ClipboardHandler>,
) -> Result<ShareOutcome, ExportError> {
    let url = share_url(target, title, poem, app_url)?.to_string();
    match open_url(&url) {
        Ok(()) => Ok(ShareOutcome::Opened),
        Err(open_err) => {
            tracing::warn!(error = %open_err, "Falling back to copying share link");
            match clipboard {
                Some(handler) => handler.set_text(&url)?,
                None => crate::clipboard::copy_text(&url)?,
            }
            Ok(ShareOutcome::CopiedLink(url))
        }
    }
}
