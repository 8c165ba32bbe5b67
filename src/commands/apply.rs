use crate::cli::{Cli, RunArgs};
use crate::engine::Mode;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS, Result};

use super::context::{emit_report, execute, print_error};

#[must_use]
pub fn run_apply(args: &RunArgs, cli: &Cli) -> i32 {
    match run_apply_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Rewrites every file whose header is missing or outdated. Files that could not be
/// fixed turn the exit code to [`EXIT_VIOLATIONS`].
pub(crate) fn run_apply_impl(args: &RunArgs, cli: &Cli) -> Result<i32> {
    let report = execute(args, cli, Mode::Apply)?;
    emit_report(&report, args, cli)?;

    let summary = report.apply_summary();
    tracing::info!(
        inserted = summary.inserted,
        replaced = summary.replaced,
        failed = summary.failed,
        "apply finished"
    );

    Ok(if summary.failed > 0 {
        EXIT_VIOLATIONS
    } else {
        EXIT_SUCCESS
    })
}
