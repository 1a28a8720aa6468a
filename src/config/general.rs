//! The general configuration settings for llama.
//!
//! This module defines the [General] struct for deserializing the `[general]`
//! table of llama.toml and the [InternalGeneral] struct used at runtime, where
//! out-of-range values have already been clamped.

use crate::core::preview::DEFAULT_MAX_PREVIEW_BYTES;
use crate::core::search::SearchCase;

use serde::Deserialize;

use std::time::Duration;

/// Idle time after the last search keystroke before search mode closes.
pub const DEFAULT_SEARCH_TIMEOUT_MS: u64 = 2000;
const MIN_SEARCH_TIMEOUT_MS: u64 = 100;
const MAX_SEARCH_TIMEOUT_MS: u64 = 60_000;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    show_hidden: bool,
    dirs_first: bool,
    case_insensitive: bool,
    search_case: SearchCase,
    search_timeout_ms: u64,
    max_preview_bytes: u64,
}

impl Default for General {
    fn default() -> Self {
        General {
            show_hidden: true,
            dirs_first: false,
            case_insensitive: false,
            search_case: SearchCase::Smart,
            search_timeout_ms: DEFAULT_SEARCH_TIMEOUT_MS,
            max_preview_bytes: DEFAULT_MAX_PREVIEW_BYTES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InternalGeneral {
    show_hidden: bool,
    dirs_first: bool,
    case_insensitive: bool,
    search_case: SearchCase,
    search_timeout: Duration,
    max_preview_bytes: u64,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        Self {
            show_hidden: g.show_hidden,
            dirs_first: g.dirs_first,
            case_insensitive: g.case_insensitive,
            search_case: g.search_case,
            search_timeout: Duration::from_millis(clamp_search_timeout(g.search_timeout_ms)),
            max_preview_bytes: g.max_preview_bytes,
        }
    }
}

impl Default for InternalGeneral {
    fn default() -> Self {
        General::default().into()
    }
}

impl InternalGeneral {
    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn dirs_first(&self) -> bool {
        self.dirs_first
    }

    #[inline]
    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    #[inline]
    pub fn search_case(&self) -> SearchCase {
        self.search_case
    }

    #[inline]
    pub fn search_timeout(&self) -> Duration {
        self.search_timeout
    }

    #[inline]
    pub fn max_preview_bytes(&self) -> u64 {
        self.max_preview_bytes
    }
}

/// Safely clamp the search timeout.
fn clamp_search_timeout(value: u64) -> u64 {
    let clamped = value.clamp(MIN_SEARCH_TIMEOUT_MS, MAX_SEARCH_TIMEOUT_MS);
    if clamped != value {
        eprintln!(
            "[llama] Warning: search_timeout_ms={} out of range ({}..={}), clamped to {}",
            value, MIN_SEARCH_TIMEOUT_MS, MAX_SEARCH_TIMEOUT_MS, clamped
        );
    }
    clamped
}
