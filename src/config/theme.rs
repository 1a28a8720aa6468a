//! Theme configuration options for llama
//!
//! This module defines the `[theme]` table of llama.toml. Every entry is a
//! [ColorPair]; colors that are left at "default" fall back to the internal theme.

use crate::utils::parse_color;

use ratatui::style::{Color, Style};
use serde::Deserialize;

use std::sync::LazyLock;

/// Theme configuration options
///
/// # Examples
/// ```toml
/// [theme.cursor]
/// fg = "black"
/// bg = "#ffaf00"
/// [theme.directory]
/// fg = "blue"
/// ```
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Theme {
    bar: ColorPair,
    search: ColorPair,
    cursor: ColorPair,
    warning: ColorPair,
    directory: ColorPair,
    #[serde(rename = "match")]
    matched: ColorPair,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            bar: ColorPair {
                fg: Color::White,
                bg: Color::Rgb(0x5C, 0x5C, 0x5C),
            },
            search: ColorPair {
                fg: Color::White,
                bg: Color::Rgb(0x49, 0x9F, 0x1C),
            },
            cursor: ColorPair {
                fg: Color::White,
                bg: Color::Rgb(0x82, 0x5D, 0xF2),
            },
            warning: ColorPair::default(),
            directory: ColorPair::default(),
            matched: ColorPair {
                fg: Color::Yellow,
                ..ColorPair::default()
            },
        }
    }
}

impl Theme {
    /// Get internal default theme reference
    /// Used for fallback when a color is set to Reset
    pub fn internal_defaults() -> &'static Self {
        static DEFAULT: LazyLock<Theme> = LazyLock::new(Theme::default);
        &DEFAULT
    }

    /// Location bar.
    pub fn bar_style(&self) -> Style {
        self.bar.style_or(&Theme::internal_defaults().bar)
    }

    /// Search filter shown after the location.
    pub fn search_style(&self) -> Style {
        self.search.style_or(&Theme::internal_defaults().search)
    }

    /// Selected grid cell.
    pub fn cursor_style(&self) -> Style {
        self.cursor.style_or(&Theme::internal_defaults().cursor)
    }

    /// Border and text of warning boxes.
    pub fn warning_style(&self) -> Style {
        self.warning.style_or(&Theme::internal_defaults().warning)
    }

    pub fn directory_style(&self) -> Style {
        self.directory
            .style_or(&Theme::internal_defaults().directory)
    }

    /// Matched query characters inside the cursor cell.
    pub fn match_style(&self) -> Style {
        self.matched.style_or(&Theme::internal_defaults().matched)
    }
}

/// ColorPair struct to hold foreground and background colors.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    #[serde(default, deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default, deserialize_with = "deserialize_color_field")]
    bg: Color,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    pub fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    /// Resolves the ColorPair by replacing Reset colors with those from another ColorPair.
    pub fn resolve(&self, other: &ColorPair) -> Self {
        Self {
            fg: if self.fg == Color::Reset {
                other.fg
            } else {
                self.fg
            },
            bg: if self.bg == Color::Reset {
                other.bg
            } else {
                self.bg
            },
        }
    }

    /// Converts the ColorPair to a Style, falling back to `fallback` for Reset colors.
    pub fn style_or(&self, fallback: &ColorPair) -> Style {
        let resolved = self.resolve(fallback);
        Style::default().fg(resolved.fg).bg(resolved.bg)
    }
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cursor_is_purple_on_white() {
        let style = Theme::default().cursor_style();
        assert_eq!(style.bg, Some(Color::Rgb(0x82, 0x5D, 0xF2)));
        assert_eq!(style.fg, Some(Color::White));
    }

    #[test]
    fn user_override_keeps_unset_fields() -> Result<(), Box<dyn std::error::Error>> {
        let theme: Theme = toml::from_str(
            r##"
            [cursor]
            bg = "#000000"
            [match]
            fg = "red"
            "##,
        )?;
        let cursor = theme.cursor_style();
        assert_eq!(cursor.bg, Some(Color::Rgb(0, 0, 0)));
        // fg left out of the table falls back to the internal default
        assert_eq!(cursor.fg, Some(Color::White));
        assert_eq!(theme.match_style().fg, Some(Color::Red));
        assert_eq!(theme.bar_style(), Theme::default().bar_style());
        Ok(())
    }
}
