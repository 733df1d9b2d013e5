//! Menu-driven controller: one action per cycle, always back to the menu.

pub mod add;
pub mod del;
pub mod menu;
pub mod session;
pub mod update;
pub mod view;

pub use menu::MenuAction;
pub use session::Session;
