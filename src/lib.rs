//! emtrack library root.
//! Exposes the CLI parser, the high-level run() function, and the modules
//! behind the interactive tracker.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod tracing_setup;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        None | Some(Commands::Menu) => cli::commands::menu::handle(cfg),
        Some(Commands::Init) => cli::commands::init::handle(cli),
        Some(cmd @ Commands::Config { .. }) => cli::commands::config::handle(cmd, cfg),
        Some(cmd @ Commands::Db { .. }) => cli::commands::db::handle(cmd, cfg),
        Some(cmd @ Commands::View { .. }) => cli::commands::view::handle(cmd, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    tracing_setup::init_tracing(cli.debug)?;

    // Config is loaded once; `--db` wins over file and environment.
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.set_database(custom_db);
    }
    tracing::debug!(database = %cfg.database, "configuration loaded");

    dispatch(&cli, &cfg)
}
