pub mod checker;
pub mod cli;
pub mod comment;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod git;
pub mod logging;
pub mod output;
pub mod resolver;
pub mod rule;
pub mod scanner;

pub use error::{HeaderGuardError, Result};

pub const EXIT_SUCCESS: i32 = 0;
/// `check` found headers to fix, or `apply` left files it could not fix.
pub const EXIT_VIOLATIONS: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
