use clap::Parser;

use asset_guard::cli::{Cli, Commands};
use asset_guard::commands::{run_delete, run_init, run_scan, run_stats, run_whitelist};
use asset_guard::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Scan(args) => run_scan(args, &cli),
        Commands::Whitelist(args) => run_whitelist(args, &cli),
        Commands::Delete(args) => run_delete(args, &cli),
        Commands::Stats(args) => run_stats(args, &cli),
        Commands::Init(args) => run_init(args, &cli),
    };

    std::process::exit(exit_code);
}
