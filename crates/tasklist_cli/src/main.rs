//! Interactive terminal to-do list.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Open storage, hydrate the list and hand stdin to the screen loop.

mod screen;

use clap::Parser;
use log::warn;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tasklist_core::db::{open_db, open_db_in_memory};
use tasklist_core::{init_logging, AppConfig, SqliteKvRepository, TodoService};

/// Single-screen to-do list persisted across sessions.
#[derive(Debug, Parser)]
#[command(name = "tasklist", version, about)]
struct Cli {
    /// SQLite file holding the list (env: TASKLIST_DB_PATH).
    #[arg(long)]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files (env: TASKLIST_LOG_DIR).
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error (env: TASKLIST_LOG_LEVEL).
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn into_config(self, mut config: AppConfig) -> AppConfig {
        if let Some(db) = self.db {
            config.db_path = db;
        }
        if self.log_dir.is_some() {
            config.log_dir = self.log_dir;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config
    }
}

fn main() -> ExitCode {
    let config = Cli::parse().into_config(AppConfig::from_env());

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, &log_dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            warn!(
                "event=cli_start module=cli status=degraded reason=db_open_failed error={}",
                err
            );
            eprintln!(
                "cannot open `{}` ({err}); changes will not be saved",
                config.db_path.display()
            );
            match open_db_in_memory() {
                Ok(conn) => conn,
                Err(err) => {
                    eprintln!("cannot start: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
    };

    let repo = match SqliteKvRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("cannot start: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut service = TodoService::load(repo);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match screen::run_session(&mut service, stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("terminal error: {err}");
            ExitCode::FAILURE
        }
    }
}
