use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for emtrack
/// Interactive tracker for departments, roles and employees stored in SQLite
#[derive(Parser, Debug)]
#[command(
    name = "emtrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Employee Management Tracker: manage departments, roles and employees from the terminal",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Print diagnostic traces on stderr
    #[arg(global = true, long = "debug")]
    pub debug: bool,

    /// Without a subcommand the interactive menu starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive menu (default)
    Menu,

    /// Initialize the database and configuration
    Init,

    /// Show the effective configuration
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print a listing without entering the menu
    View {
        #[arg(value_enum)]
        target: ViewTarget,

        #[arg(
            long = "department",
            value_name = "ID",
            help = "Only employees of this department (required for budget)"
        )]
        department: Option<i64>,

        #[arg(
            long = "manager",
            value_name = "ID",
            conflicts_with = "department",
            help = "Only employees reporting to this manager"
        )]
        manager: Option<i64>,

        #[arg(
            long = "role",
            value_name = "ID",
            conflicts_with_all = ["department", "manager"],
            help = "Only employees holding this role"
        )]
        role: Option<i64>,

        #[arg(long = "json", help = "Print JSON instead of a table")]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewTarget {
    Departments,
    Roles,
    Employees,
    Managers,
    Budget,
}
