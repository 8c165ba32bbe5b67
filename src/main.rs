use clap::Parser;

use header_guard::cli::{Cli, Commands};
use header_guard::commands::{run_apply, run_check, run_config, run_init};
use header_guard::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Apply(args) => run_apply(args, &cli),
        Commands::Init(args) => run_init(args),
        Commands::Config(args) => run_config(args, &cli),
    };

    std::process::exit(exit_code);
}
