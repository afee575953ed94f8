mod app;
mod command;
mod config;
mod consts;
mod game;
mod gesture;
mod store;
mod theme;
mod util;
mod view;
use crate::app::App;
use crate::config::Config;
use crate::game::GameEngine;
use anyhow::Context;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: gridsnake [<options>]

Play snake on a 20×20 grid in the terminal

Options:
  -c, --config <FILE>   Read configuration from the given file
      --log-file <FILE> Write diagnostic logs to the given file
  -h, --help            Display this help message and exit
  -V, --version         Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Arguments {
    Run {
        config: Option<PathBuf>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Arguments {
    fn from_parser(mut parser: Parser) -> Result<Arguments, lexopt::Error> {
        let mut config = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Short('h') | Arg::Long("help") => return Ok(Arguments::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Arguments::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Arguments::Run { config, log_file })
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e
                .downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Exiting on error: {e:#}");
            eprintln!("gridsnake: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let (config_path, log_file) = match Arguments::from_parser(Parser::from_env())? {
        Arguments::Run { config, log_file } => (config, log_file),
        Arguments::Help => {
            print!("{USAGE}");
            return Ok(());
        }
        Arguments::Version => {
            println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
    };
    let config = load_config(config_path)?;
    if let Some(path) = log_file.as_deref().or(config.logging.file.as_deref()) {
        init_logging(path, &config.logging.level)?;
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting up");
    let store = config
        .open_store()
        .context("failed to open high score store")?;
    let app = App::new(GameEngine::new(store), config.theme);

    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
        .and_then(|()| app.run(terminal));
    if let Err(e) = execute!(io::stdout(), DisableFocusChange, DisableMouseCapture) {
        let e: &(dyn std::error::Error + 'static) = &e;
        tracing::warn!(error = e, "Failed to disable mouse capture");
    }
    ratatui::restore();
    r?;
    Ok(())
}

/// Load the configuration file given on the command line or, failing that,
/// the default configuration file if it exists
fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let (path, allow_missing) = match path {
        Some(p) => (p, false),
        None => (Config::default_path()?, true),
    };
    Config::load(&path, allow_missing)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}

/// Send `tracing` output to `path`.  The terminal belongs to the game, so
/// logs only go anywhere if a log file is configured.
fn init_logging(path: &Path, level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level {level:?}"))?;
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .context("failed to open log file")?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .init();
    Ok(())
}
