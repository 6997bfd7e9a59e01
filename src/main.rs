mod app;
mod command;
mod config;
mod consts;
mod game;
mod help;
mod menu;
mod save;
mod util;
use crate::app::{App, Globals};
use crate::config::Config;
use crate::save::HighScores;
use std::io::{self, ErrorKind};
use std::process::ExitCode;

fn main() -> ExitCode {
    let globals = match startup() {
        Ok(globals) => globals,
        Err(e) => {
            eprintln!("boomslang: {e:#}");
            return ExitCode::from(2);
        }
    };
    let terminal = ratatui::init();
    let r = App::new(globals).run(terminal);
    ratatui::restore();
    io_exit(r)
}

/// Load everything from disk before the terminal enters raw mode, so that
/// startup problems are reported as normal error output.
fn startup() -> anyhow::Result<Globals> {
    let config = Config::load(&Config::default_path()?)?;
    let high_scores = match config.high_scores_file() {
        Some(path) => HighScores::load(&path)?,
        None => HighScores::default(),
    };
    Ok(Globals {
        config,
        high_scores,
    })
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
