//! State of the preview pane in llama.
//!
//! Tracks whether preview mode is on, which path was requested last and the
//! content that arrived for it. Loads finish out of order; only the response
//! carrying the newest request id is applied.

use crate::core::PreviewContent;

use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct PreviewState {
    enabled: bool,
    path: Option<PathBuf>,
    content: Option<PreviewContent>,
    request_id: u64,
}

impl PreviewState {
    // Getters / Accessors

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[inline]
    pub fn content(&self) -> Option<&PreviewContent> {
        self.content.as_ref()
    }

    #[inline]
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    // Mutators

    /// Flips preview mode and returns the new value. Turning it off drops the content.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        if !self.enabled {
            self.clear();
        }
        self.enabled
    }

    /// Registers a new load for `path` and returns its request id.
    ///
    /// The previous content stays visible until the new one arrives.
    pub fn prepare_new_request(&mut self, path: PathBuf) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        self.path = Some(path);
        self.request_id
    }

    /// Applies loaded content if it answers the latest request.
    pub fn update_content(&mut self, content: PreviewContent, request_id: u64) -> bool {
        if request_id != self.request_id || !self.enabled {
            return false;
        }
        self.content = Some(content);
        true
    }

    /// Drops path and content; in-flight loads become stale.
    pub fn clear(&mut self) {
        self.request_id = self.request_id.wrapping_add(1);
        self.path = None;
        self.content = None;
    }
}
