//! Input configuration options for llama
//!
//! This module defines the `[keys]` and `[editor]` tables of llama.toml.

use crate::core::proc::EditorCommand;

use serde::Deserialize;

/// Key bindings of all actions.
///
/// Each action takes a list of key strings such as `"k"`, `"Up"`, `"Shift+Up"`
/// or `"<c-c>"`.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keys {
    up: Vec<String>,
    down: Vec<String>,
    left: Vec<String>,
    right: Vec<String>,
    top: Vec<String>,
    bottom: Vec<String>,
    leftmost: Vec<String>,
    rightmost: Vec<String>,
    open: Vec<String>,
    back: Vec<String>,
    search: Vec<String>,
    preview: Vec<String>,
    quit: Vec<String>,
    force_quit: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    up, down, left, right, top, bottom, leftmost, rightmost, open, back, search, preview, quit,
    force_quit,
);

impl Default for Keys {
    fn default() -> Self {
        Keys {
            up: vec!["Up".into(), "k".into()],
            down: vec!["Down".into(), "j".into()],
            left: vec!["Left".into(), "h".into()],
            right: vec!["Right".into(), "l".into()],
            top: vec!["Shift+Up".into(), "g".into()],
            bottom: vec!["Shift+Down".into(), "G".into()],
            leftmost: vec!["Shift+Left".into()],
            rightmost: vec!["Shift+Right".into()],

            open: vec!["Enter".into()],
            back: vec!["Backspace".into()],

            search: vec!["/".into()],
            preview: vec!["Space".into()],

            quit: vec!["Esc".into()],
            force_quit: vec!["Ctrl+c".into()],
        }
    }
}

/// Editor configuration options
///
/// The editor is taken from the first non-empty environment variable in `env`,
/// falling back to `fallback`.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Editor {
    env: Vec<String>,
    fallback: String,
}

impl Editor {
    #[inline]
    pub fn env(&self) -> &[String] {
        &self.env
    }

    #[inline]
    pub fn fallback(&self) -> &str {
        let trimmed = self.fallback.trim();
        if trimmed.is_empty() { "less" } else { trimmed }
    }

    /// Resolves the command against the current environment.
    pub fn command(&self) -> EditorCommand {
        EditorCommand::resolve(&self.env, self.fallback())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Editor {
            env: vec!["LLAMA_EDITOR".into(), "EDITOR".into()],
            fallback: "less".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_keys_table_keeps_other_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let keys: Keys = toml::from_str(r#"up = ["w"]"#)?;
        assert_eq!(keys.up(), &["w".to_string()]);
        assert_eq!(keys.down(), Keys::default().down());
        Ok(())
    }

    #[test]
    fn blank_fallback_uses_less() -> Result<(), Box<dyn std::error::Error>> {
        let editor: Editor = toml::from_str("env = []\nfallback = \" \"")?;
        assert!(editor.env().is_empty());
        assert_eq!(editor.fallback(), "less");
        Ok(())
    }
}
