use std::fs;

use crate::cli::InitArgs;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, HeaderGuardError, Result};

use super::context::print_error;

#[must_use]
pub fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            print_error(&e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Initializes a new configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub(crate) fn run_init_impl(args: &InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(HeaderGuardError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template()).map_err(|source| {
        HeaderGuardError::FileWrite {
            path: output_path.clone(),
            source,
        }
    })?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r#"# header-guard configuration file
version = "1"

# Enable debug logging (same as --debug)
# debug = false

[scanner]
# Respect .gitignore rules (default: true)
gitignore = true

# Paths that are never visited nor rewritten
exclude = ["**/target/**", "**/node_modules/**"]

# Directories to scan when no path is given (empty = current directory)
# include_paths = ["src", "tests"]

[project]
# First year of the project; defaults to the year of the last commit, or the
# current year outside git
# creation_year = 2024

# License header templates. `#type NAME TYPE` declares the type of a ${NAME}
# placeholder: CREATION_YEAR, FILE_NAME, YEAR_LENIENT_RANGE or YEAR_LIST.
# CREATION_YEAR and FILE_NAME are always available. `#optional` ... `#end` marks
# lines that may be absent, `#year_selection file` takes years from each file's
# git history. A `${` after a backslash is plain text.
[[header]]
name = "MIT"
text = '''
#type YEARS YEAR_LENIENT_RANGE
Copyright (c) ${YEARS} The Authors

Licensed under the MIT License. See LICENSE for details.
'''

# Templates can also live in their own file, relative to this one
# [[header]]
# name = "Apache-2.0"
# file = "HEADER"

# Rules assign headers to files. Without any rule, every known file type gets
# every header, the first one being the default.
# [[rule]]
# name = "java"
# include = ["**/*.java"]
# format = "block"        # block, line, xml or hash; inferred from the extension by default
# headers = ["MIT"]
"#
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
