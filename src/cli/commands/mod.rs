//! One handler per subcommand, each taking the parsed command and the
//! effective configuration.

pub mod config;
pub mod db;
pub mod init;
pub mod menu;
pub mod view;
