//! Sorting, filtering and display sanitizing for llama.
//!
//! The [Formatter] holds the rules for filtering and sorting directory entries,
//! based on user preferences from the llama.toml configuration.

use crate::core::FileEntry;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use std::cmp::Ordering;

/// Formatter struct to handle sorting and filtering of file entries
/// based on user preferences.
pub struct Formatter {
    dirs_first: bool,
    show_hidden: bool,
    case_insensitive: bool,
}

impl Formatter {
    pub fn new(dirs_first: bool, show_hidden: bool, case_insensitive: bool) -> Self {
        Self {
            dirs_first,
            show_hidden,
            case_insensitive,
        }
    }

    /// Sorts the given entries in place. Plain name order unless configured otherwise.
    pub fn sort_entries(&self, entries: &mut [FileEntry]) {
        entries.sort_by(|a, b| {
            if self.dirs_first {
                match (a.is_dir(), b.is_dir()) {
                    (true, false) => return Ordering::Less,
                    (false, true) => return Ordering::Greater,
                    _ => {}
                }
            }
            if self.case_insensitive {
                a.name_str()
                    .to_lowercase()
                    .cmp(&b.name_str().to_lowercase())
                    .then_with(|| a.name().cmp(b.name()))
            } else {
                a.name().cmp(b.name())
            }
        });
    }

    /// Filters the given entries in place and sorts what remains.
    pub fn filter_entries(&self, entries: &mut Vec<FileEntry>) {
        if !self.show_hidden {
            entries.retain(|e| !e.is_hidden());
        }
        self.sort_entries(entries);
    }
}

/// Removes control characters from a line so it can be drawn safely.
///
/// Tabs are expected to be expanded already; any remaining control character is dropped.
pub fn strip_control(line: &str) -> String {
    line.chars().filter(|c| !c.is_control()).collect()
}

/// Drops characters from the left of `text` until it fits into `max_width` columns.
///
/// Never goes below an empty string, no matter how small `max_width` is.
pub fn truncate_left(text: &str, max_width: usize) -> &str {
    let mut width = text.width();
    if width <= max_width {
        return text;
    }
    for (idx, ch) in text.char_indices() {
        if width <= max_width {
            return &text[idx..];
        }
        width -= ch.width().unwrap_or(0);
    }
    ""
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[FileEntry]) -> Vec<String> {
        entries.iter().map(|e| e.name_str().into_owned()).collect()
    }

    #[test]
    fn default_order_is_plain_name_order() {
        let mut entries = vec![
            FileEntry::new("beta", 0),
            FileEntry::new("Alpha", FileEntry::IS_DIR),
            FileEntry::new(".git", FileEntry::IS_DIR | FileEntry::IS_HIDDEN),
            FileEntry::new("alpha.txt", 0),
        ];
        Formatter::new(false, true, false).filter_entries(&mut entries);
        assert_eq!(names(&entries), vec![".git", "Alpha", "alpha.txt", "beta"]);
    }

    #[test]
    fn hidden_filter_and_dirs_first() {
        let mut entries = vec![
            FileEntry::new("b.txt", 0),
            FileEntry::new("zdir", FileEntry::IS_DIR),
            FileEntry::new(".hidden", FileEntry::IS_HIDDEN),
            FileEntry::new("A.txt", 0),
        ];
        Formatter::new(true, false, true).filter_entries(&mut entries);
        assert_eq!(names(&entries), vec!["zdir", "A.txt", "b.txt"]);
    }

    #[test]
    fn truncate_left_keeps_the_tail() {
        assert_eq!(truncate_left("~/projects/llama", 100), "~/projects/llama");
        assert_eq!(truncate_left("~/projects/llama", 5), "llama");
        assert_eq!(truncate_left("abc", 0), "");
        assert_eq!(truncate_left("", 0), "");
    }

    #[test]
    fn truncate_left_respects_wide_chars() {
        let out = truncate_left("ab🦀cd", 3);
        assert!(out.width() <= 3);
        assert!(out.ends_with("cd"));
    }

    #[test]
    fn strip_control_drops_escape_sequences() {
        assert_eq!(strip_control("a\x1b[31mb\r"), "a[31mb");
    }
}
