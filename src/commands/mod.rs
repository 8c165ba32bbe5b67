mod apply;
mod check;
mod config;
mod context;
mod init;

pub use apply::run_apply;
pub use check::run_check;
pub use config::{format_config_text, run_config};
pub use context::print_error;
pub use init::{generate_config_template, run_init};
