use crate::config::Config;
use crate::core::Session;
use crate::db::open_database;
use crate::errors::{AppError, AppResult};
use crate::ui::prompt::InquirePrompter;
use std::io::IsTerminal;
use tracing::info;

/// The menu needs a real terminal on both ends.
fn can_use_menu() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

pub fn handle(cfg: &Config) -> AppResult<()> {
    if !can_use_menu() {
        return Err(AppError::Prompt(
            "the interactive menu needs a terminal (use `emtrack view ...` for scripted output)"
                .into(),
        ));
    }

    let mut pool = open_database(&cfg.database)?;
    info!(database = %cfg.database, "interactive session started");

    let result = Session::new(&mut pool, InquirePrompter::default(), &cfg.currency_symbol).run();

    // Close even when the session failed; the session error wins.
    let closed = pool.close();
    result.and(closed)
}
