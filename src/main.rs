//! main.rs
//! Entry point for llama
//!
//! Exit codes: 0 after a normal quit (the directory is printed to stdout),
//! 2 after a forced quit, 1 for usage and runtime errors.

use llama_tui::app::AppState;
use llama_tui::config::Config;
use llama_tui::core::terminal::{self, Outcome};
use llama_tui::utils::cli::{CliAction, handle_args};

use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stderr = std::io::stderr();
        let _ = crossterm::execute!(
            stderr,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[llama] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let initial_path = match handle_args() {
        CliAction::Exit(code) => return exit_code(code),
        CliAction::RunApp => None,
        CliAction::RunAppAtPath(path) => {
            if !path.is_dir() {
                eprintln!("[llama] Error: '{}' is not a directory.", path.display());
                return ExitCode::from(1);
            }
            Some(path)
        }
    };

    let config = Config::load();

    match run(&config, initial_path.as_deref()) {
        Ok(Outcome::Cd(dir)) => {
            println!("{}", dir.display());
            ExitCode::SUCCESS
        }
        Ok(Outcome::Abort) => ExitCode::from(2),
        Err(e) => {
            eprintln!("[llama] Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn run(config: &Config, initial_path: Option<&Path>) -> std::io::Result<Outcome> {
    let mut app = match initial_path {
        Some(path) => AppState::from_dir(config, path)?,
        None => AppState::new(config)?,
    };
    terminal::run_terminal(&mut app)
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
