//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod generate;
pub mod list;
pub mod show;
pub mod validate;

pub use generate::run_generate;
pub use list::run_list;
pub use show::run_show;
pub use validate::run_validate;
