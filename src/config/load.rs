//! The main config loading module for llama.
//!
//! Handles loading and deserializing settings from `llama.toml`.
//!
//! Provides the main [Config] struct, as well as the internal [RawConfig] used for parsing.
//! Also implements default config generation for `llama --init`.

use crate::config::{Display, Editor, General, InternalGeneral, Keys, Theme};
use crate::utils::get_home;

use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Raw configuration as read from the toml file.
/// Converted into the main [Config] struct after parsing.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct RawConfig {
    general: General,
    display: Display,
    theme: Theme,
    editor: Editor,
    keys: Keys,
}

/// Main configuration struct for llama
#[derive(Debug, Clone)]
pub struct Config {
    general: InternalGeneral,
    display: Display,
    theme: Theme,
    editor: Editor,
    keys: Keys,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            display: raw.display,
            theme: raw.theme,
            editor: raw.editor,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// A missing file silently yields the defaults; an unreadable or invalid
    /// file prints a warning and yields the defaults. Called once at startup,
    /// before the terminal enters raw mode.
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[llama] Error loading config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load and parse the configuration at `path`.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from toml text.
    pub fn parse(content: &str) -> io::Result<Self> {
        toml::from_str::<RawConfig>(content)
            .map(Config::from)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn display(&self) -> &Display {
        &self.display
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Determine the default configuration file path.
    /// Checks the LLAMA_CONFIG environment variable first,
    /// then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/llama/llama.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("LLAMA_CONFIG")
            && !path.is_empty()
        {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config.is_empty()
        {
            return PathBuf::from(xdg_config).join("llama/llama.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/llama/llama.toml");
        }
        PathBuf::from("llama.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {}", path.display()),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        eprintln!("[llama] Default config generated at {}", path.display());
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

const DEFAULT_TOML: &str = r##"# llama.toml - configuration for llama
#
# Commented values are the internal defaults.
# Colors take terminal names ("cyan") or hex codes ("#RRGGBB").

[general]
# show_hidden = true
# dirs_first = false
# case_insensitive = false
# search_case = "smart"        # "smart", "ignore" or "respect"
# search_timeout_ms = 2000
# max_preview_bytes = 10485760

[display]
# dir_marker = true
# separator_width = 4
# preview_padding = 2

# [theme.bar]
# fg = "white"
# bg = "#5C5C5C"

# [theme.search]
# fg = "white"
# bg = "#499F1C"

# [theme.cursor]
# fg = "white"
# bg = "#825DF2"

# [theme.warning]
# fg = "default"
# bg = "default"

# [theme.directory]
# fg = "default"
# bg = "default"

# [theme.match]
# fg = "yellow"
# bg = "default"

# [editor]
# env = ["LLAMA_EDITOR", "EDITOR"]
# fallback = "less"

# [keys]
# up = ["Up", "k"]
# down = ["Down", "j"]
# left = ["Left", "h"]
# right = ["Right", "l"]
# top = ["Shift+Up", "g"]
# bottom = ["Shift+Down", "G"]
# leftmost = ["Shift+Left"]
# rightmost = ["Shift+Right"]
# open = ["Enter"]
# back = ["Backspace"]
# search = ["/"]
# preview = ["Space"]
# quit = ["Esc"]
# force_quit = ["Ctrl+c"]
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn generated_config_parses_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("nested/llama.toml");
        Config::generate_default(&path)?;

        let config = Config::load_from(&path)?;
        let defaults = Config::default();
        assert_eq!(config.keys().up(), defaults.keys().up());
        assert_eq!(config.display().separator_width(), 4);
        assert_eq!(config.editor().fallback(), "less");

        let err = Config::generate_default(&path).err().ok_or("overwrote config")?;
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        Ok(())
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let err = Config::parse("[general\nshow_hidden = ").err();
        assert!(matches!(err, Some(e) if e.kind() == io::ErrorKind::InvalidData));
    }

    #[test]
    fn sections_override_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::parse(
            r#"
            [general]
            show_hidden = false
            dirs_first = true

            [keys]
            quit = ["q"]
            "#,
        )?;
        assert!(!config.general().show_hidden());
        assert!(config.general().dirs_first());
        assert_eq!(config.keys().quit(), &["q".to_string()]);
        assert_eq!(config.keys().force_quit(), &["Ctrl+c".to_string()]);
        Ok(())
    }
}
