use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{pending_count, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let pending = pending_count(&pool.conn)?;
            let applied = run_pending_migrations(&pool.conn)?;
            for version in &applied {
                println!("    {}", version);
            }
            println!(
                "{}✔ Migration completed ({} of {} applied).{}\n",
                GREEN,
                applied.len(),
                pending,
                RESET
            );
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(&pool, &cfg.database, &cfg.currency_symbol)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
            let orphans: i64 = pool
                .conn
                .query_row("SELECT COUNT(*) FROM pragma_foreign_key_check()", [], |row| {
                    row.get(0)
                })?;

            if integrity == "ok" && orphans == 0 {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!(
                    "{}✘ Integrity check failed:{} {} ({} broken reference(s))\n",
                    RED, RESET, integrity, orphans
                );
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }

        pool.close()?;
    }

    Ok(())
}
