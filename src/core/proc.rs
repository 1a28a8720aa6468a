//! External process handling for llama.
//!
//! Resolves the editor/pager used to open files and runs it with the terminal
//! handed over. The call blocks the event loop until the child exits.

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

use std::env;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Command;

/// Program (plus leading arguments) used to open files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl EditorCommand {
    /// Builds a command from a value such as `"nvim -R"`.
    ///
    /// Returns `None` for an empty or whitespace-only value.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split_whitespace();
        let program = parts.next()?;
        Some(Self {
            program: program.into(),
            args: parts.map(OsString::from).collect(),
        })
    }

    /// Resolves the editor from the first non-empty variable in `env_names`,
    /// falling back to `fallback`.
    pub fn resolve<S: AsRef<str>>(env_names: &[S], fallback: &str) -> Self {
        Self::resolve_with(env_names, fallback, |name| env::var(name).ok())
    }

    /// Same as [EditorCommand::resolve] with an injectable variable lookup.
    pub fn resolve_with<S, F>(env_names: &[S], fallback: &str, lookup: F) -> Self
    where
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        env_names
            .iter()
            .filter_map(|name| lookup(name.as_ref()))
            .find_map(|value| Self::parse(&value))
            .or_else(|| Self::parse(fallback))
            .unwrap_or_else(|| Self {
                program: "less".into(),
                args: Vec::new(),
            })
    }

    #[inline]
    pub fn program(&self) -> &OsString {
        &self.program
    }

    #[inline]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Whether the program can be found on PATH (or exists as given).
    pub fn exists(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    /// The command line for `path`, without spawning it.
    pub fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(path);
        cmd
    }
}

/// Leaves the TUI, runs the editor on `path` and restores the TUI afterwards.
///
/// The terminal is restored even if the editor could not be spawned. A
/// non-zero exit of the editor is reported as an error.
pub fn open_in_editor(editor: &EditorCommand, path: &Path) -> io::Result<()> {
    let mut stderr = io::stderr();
    disable_raw_mode()?;
    execute!(stderr, LeaveAlternateScreen, Show)?;

    let status = editor.command(path).status();

    execute!(io::stderr(), EnterAlternateScreen, Hide)?;
    enable_raw_mode()?;

    let status = status.map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("{}: {}", editor.program().to_string_lossy(), e),
        )
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "{} exited with {}",
            editor.program().to_string_lossy(),
            status
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const NAMES: [&str; 2] = ["LLAMA_EDITOR", "EDITOR"];

    #[test]
    fn first_set_variable_wins() {
        let cmd = EditorCommand::resolve_with(
            &NAMES,
            "less",
            lookup(&[("LLAMA_EDITOR", "hx"), ("EDITOR", "vim")]),
        );
        assert_eq!(cmd.program(), "hx");

        let cmd = EditorCommand::resolve_with(&NAMES, "less", lookup(&[("EDITOR", "vim")]));
        assert_eq!(cmd.program(), "vim");
    }

    #[test]
    fn empty_variable_is_skipped() {
        let cmd = EditorCommand::resolve_with(
            &NAMES,
            "less",
            lookup(&[("LLAMA_EDITOR", "  "), ("EDITOR", "nano")]),
        );
        assert_eq!(cmd.program(), "nano");
    }

    #[test]
    fn fallback_when_nothing_set() {
        let cmd = EditorCommand::resolve_with(&NAMES, "less", lookup(&[]));
        assert_eq!(cmd.program(), "less");
        assert!(cmd.args().is_empty());

        let cmd = EditorCommand::resolve_with(&NAMES, "", lookup(&[]));
        assert_eq!(cmd.program(), "less");
    }

    #[test]
    fn value_with_arguments_is_split() {
        let cmd = EditorCommand::resolve_with(&NAMES, "less", lookup(&[("EDITOR", "code --wait")]));
        assert_eq!(cmd.program(), "code");
        assert_eq!(cmd.args(), &[OsString::from("--wait")]);

        let built = cmd.command(Path::new("notes.md"));
        let args: Vec<_> = built.get_args().collect();
        assert_eq!(args, vec!["--wait", "notes.md"]);
    }

    #[test]
    fn missing_program_does_not_exist() {
        let cmd = EditorCommand::parse("llama-no-such-editor-binary").expect("non-empty");
        assert!(!cmd.exists());
    }
}
