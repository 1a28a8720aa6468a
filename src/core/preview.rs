//! Preview loading for llama.
//!
//! Turns a path into a [PreviewContent] the preview pane can draw. Runs on the
//! preview worker thread, never on the event loop.

use crate::core::{Formatter, browse_dir};

use std::fs;
use std::path::Path;

/// Files larger than this are not read for preview unless configured otherwise.
pub const DEFAULT_MAX_PREVIEW_BYTES: u64 = 10 * 1024 * 1024;

/// Replacement for a tab character in previewed text.
pub const TAB_EXPANSION: &str = "    ";

/// Placeholder shown for content that is not text.
pub const UNAVAILABLE_MESSAGE: &str = "No preview available";

/// What the preview pane shows for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewContent {
    /// Decoded text with tabs already expanded.
    Text(String),
    /// Entry names of a directory, directories suffixed with `/`.
    Listing(Vec<String>),
    /// The content is not printable text.
    Unavailable,
    /// The file exceeds the size limit and was not read.
    TooLarge,
    /// The path could not be read.
    Error(String),
}

impl PreviewContent {
    /// Lines to draw, `None` for the placeholder variants drawn as a warning box.
    pub fn lines(&self) -> Option<Vec<&str>> {
        match self {
            PreviewContent::Text(text) => Some(text.lines().collect()),
            PreviewContent::Listing(names) => Some(names.iter().map(String::as_str).collect()),
            PreviewContent::Error(msg) => Some(vec![msg.as_str()]),
            PreviewContent::Unavailable | PreviewContent::TooLarge => None,
        }
    }

    /// Text for the warning box.
    pub fn placeholder(&self) -> Option<String> {
        match self {
            PreviewContent::Unavailable => Some(UNAVAILABLE_MESSAGE.to_string()),
            PreviewContent::TooLarge => Some(format!("{UNAVAILABLE_MESSAGE} (file too large)")),
            _ => None,
        }
    }
}

/// Loads the preview for `path`.
///
/// Never fails: read errors become [PreviewContent::Error] so navigation continues.
pub fn load_preview(path: &Path, max_bytes: u64) -> PreviewContent {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) => return PreviewContent::Error(e.to_string()),
    };

    if meta.is_dir() {
        return match browse_dir(path) {
            Ok(mut entries) => {
                Formatter::new(false, true, false).sort_entries(&mut entries);
                PreviewContent::Listing(
                    entries
                        .iter()
                        .map(|e| {
                            let mut name = e.name_str().into_owned();
                            if e.is_dir() {
                                name.push('/');
                            }
                            name
                        })
                        .collect(),
                )
            }
            Err(e) => PreviewContent::Error(e.to_string()),
        };
    }

    if meta.len() > max_bytes {
        return PreviewContent::TooLarge;
    }

    match fs::read(path) {
        Ok(bytes) => classify(bytes),
        Err(e) => PreviewContent::Error(e.to_string()),
    }
}

/// Decides whether raw bytes are previewable text.
pub fn classify(bytes: Vec<u8>) -> PreviewContent {
    if bytes.contains(&0) {
        return PreviewContent::Unavailable;
    }
    match String::from_utf8(bytes) {
        Ok(text) if text.contains('\t') => PreviewContent::Text(text.replace('\t', TAB_EXPANSION)),
        Ok(text) => PreviewContent::Text(text),
        Err(_) => PreviewContent::Unavailable,
    }
}
