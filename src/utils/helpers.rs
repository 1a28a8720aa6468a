//! Helpers for llama.
//!
//! Provides utility functions used by the config and the renderer:
//! - Color parsing from names or hex codes
//! - Home directory lookup
//! - Displaying home directories as "~" in the location bar
//! - Lexical cleanup of the start path

use ratatui::style::Color;
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// Parses a string (color name or hex) into a ratatui::style::Color
///
/// Supports standard names (red, green, etc.) as well as hex values (#RRGGBB or #RGB).
/// Unknown values fall back to the terminal default.
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" | "purple" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        _ => s.strip_prefix('#').and_then(parse_hex).unwrap_or(Color::Reset),
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let expanded = match hex.len() {
        6 => hex.to_string(),
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        _ => return None,
    };
    let rgb = u32::from_str_radix(&expanded, 16).ok()?;
    Some(Color::Rgb(
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    ))
}

/// The user's home directory, if it can be determined.
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Shortens the home directory prefix of `path` to `~`.
///
/// Used for the location bar.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    match get_home() {
        Some(home) => shorten_with_home(path.as_ref(), &home),
        None => path.as_ref().display().to_string(),
    }
}

/// Removes `.` and folds `..` components without touching the filesystem.
///
/// Symlinks are kept as given. `..` above the root stays at the root.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(Component::ParentDir),
            },
            other => out.push(other),
        }
    }
    out
}

fn shorten_with_home(path: &Path, home: &Path) -> String {
    match path.strip_prefix(home) {
        Ok(stripped) if stripped.as_os_str().is_empty() => "~".to_string(),
        Ok(stripped) => format!("~{}{}", MAIN_SEPARATOR, stripped.display()),
        Err(_) => path.display().to_string(),
    }
}
