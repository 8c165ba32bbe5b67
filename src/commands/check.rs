use crate::cli::{Cli, RunArgs};
use crate::engine::Mode;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS, Result};

use super::context::{emit_report, execute, print_error};

#[must_use]
pub fn run_check(args: &RunArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

pub(crate) fn run_check_impl(args: &RunArgs, cli: &Cli) -> Result<i32> {
    let report = execute(args, cli, Mode::Check)?;
    emit_report(&report, args, cli)?;

    Ok(if report.has_problems() {
        EXIT_VIOLATIONS
    } else {
        EXIT_SUCCESS
    })
}
