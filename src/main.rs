mod app;
mod command;
mod config;
mod consts;
mod engine;
mod game;
mod logging;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::game::Game;
use anyhow::Context;
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use std::process::ExitCode;

static USAGE: &str = "\
Usage: gridsnake [--config <FILE>] [--log-file <FILE>]

Play snake in your terminal.

Options:
  -c, --config <FILE>   Read configuration from the given file
      --log-file <FILE> Append diagnostic log messages to the given file
  -h, --help            Show this help and exit
  -V, --version         Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum CliAction {
    Run(Arguments),
    Help,
    Version,
}

impl CliAction {
    fn from_parser(mut parser: Parser) -> Result<CliAction, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Short('h') | Arg::Long("help") => return Ok(CliAction::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(CliAction::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(CliAction::Run(args))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

impl Arguments {
    fn run(self) -> anyhow::Result<()> {
        let config = match self.config {
            Some(ref path) => Config::load(path, false)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => match Config::default_path() {
                Some(path) => Config::load(&path, true)
                    .with_context(|| format!("failed to load {}", path.display()))?,
                None => Config::default(),
            },
        };
        let settings = config.game.to_settings()?;
        if let Some(path) = self.log_file.as_deref().or(config.log.file.as_deref()) {
            logging::init(path, config.log.level.as_deref())?;
        }
        tracing::info!(?settings, "Starting gridsnake");
        let game = Game::new(settings).context("failed to start game")?;
        let terminal = ratatui::init();
        let r = crossterm::execute!(io::stdout(), EnableFocusChange)
            .and_then(|()| App::new(game).run(terminal));
        disable_focus_change(&mut io::stdout());
        ratatui::restore();
        r.map_err(Into::into)
    }
}

/// Turn off focus-change reporting.  Failure is logged rather than returned
/// so that the terminal still gets restored afterwards.
fn disable_focus_change<W: Write>(out: &mut W) {
    if let Err(e) = crossterm::execute!(out, DisableFocusChange) {
        tracing::warn!(error = %e, "Failed to disable focus change reporting");
    }
}

fn main() -> ExitCode {
    match CliAction::from_parser(Parser::from_env()) {
        Ok(CliAction::Run(args)) => exit(args.run()),
        Ok(CliAction::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(CliAction::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|ioe| ioe.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = ?e, "Exiting on error");
            eprintln!("gridsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}
