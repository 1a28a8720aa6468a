//! Command-line argument parsing and help for llama.
//!
//! When invoked without arguments llama starts in the current directory.
//! Help goes to stderr because stdout is reserved for the final directory.

use crate::config::Config;

use std::ffi::OsString;
use std::path::PathBuf;

/// What `main` should do after looking at the arguments.
#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    RunApp,
    RunAppAtPath(PathBuf),
    /// Exit right away with the given code.
    Exit(i32),
}

/// Parses the process arguments.
pub fn handle_args() -> CliAction {
    parse_args(std::env::args_os().skip(1).collect())
}

/// Parses `args` (without the program name).
pub fn parse_args(args: Vec<OsString>) -> CliAction {
    let mut args = args.into_iter();
    let Some(arg) = args.next() else {
        return CliAction::RunApp;
    };

    if args.next().is_some() {
        eprintln!("Error: llama accepts only one argument at a time.");
        eprintln!("Usage: llama [PATH] or llama [OPTION]");
        return CliAction::Exit(1);
    }

    match arg.to_str() {
        Some("-h" | "--help") => {
            print_help();
            CliAction::Exit(1)
        }
        Some("-v" | "--version") => {
            print_version();
            CliAction::Exit(0)
        }
        Some("--init") => match Config::generate_default(&Config::default_path()) {
            Ok(()) => CliAction::Exit(0),
            Err(e) => {
                eprintln!("Error: {}", e);
                CliAction::Exit(1)
            }
        },
        Some(flag) if flag.starts_with('-') && flag.len() > 1 => {
            eprintln!("Unknown argument: {}", flag);
            eprintln!("Try --help for available options");
            CliAction::Exit(1)
        }
        _ if arg.is_empty() => {
            eprintln!("Error: empty path");
            CliAction::Exit(1)
        }
        _ => CliAction::RunAppAtPath(PathBuf::from(arg)),
    }
}

fn print_version() {
    println!("llama {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    eprintln!(
        r#"llama - terminal directory browser

USAGE:
  llama [PATH]

PATH:
  Directory to open (defaults to current directory)

OPTIONS:
      --init              Generate a default configuration
  -h, --help              Print this help
  -v, --version           Print the version

ENVIRONMENT:
  LLAMA_CONFIG            Override the default config path
  LLAMA_EDITOR, EDITOR    Program used to open files (default: less)
{KEYBINDS_TEXT}"#
    );
}

const KEYBINDS_TEXT: &str = r##"
KEY BINDINGS:
  Arrows, hjkl            Move cursor
  Shift+Arrows, g, G      Move to the edge (top, bottom, leftmost, rightmost)
  Enter                   Enter directory / open file in editor
  Backspace               Go to parent directory
  /                       Start search (press again to leave it)
  Space                   Toggle preview
  Esc                     Quit and print the current directory
  Ctrl+C                  Quit without printing anything

  In search mode every letter is part of the query.
  Keys can be changed in the [keys] table of llama.toml.
"##;
