use crate::cli::{Cli, StatsArgs};
use crate::error::Result;
use crate::output::StatsReport;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::{CommandContext, write_output};

#[must_use]
pub fn run_stats(args: &StatsArgs, cli: &Cli) -> i32 {
    match CommandContext::from_cli(cli).and_then(|ctx| run_stats_impl(args, &ctx)) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Print unused counts and reclaimable size. Always succeeds on a scan.
///
/// # Errors
/// Returns an error if the project cannot be indexed.
pub fn run_stats_impl(args: &StatsArgs, ctx: &CommandContext) -> Result<i32> {
    let mut session = ctx.open_session()?;
    session.scan();

    let report = StatsReport::from_session(&session);
    let output = args.format.formatter(ctx.color).format_stats(&report)?;
    write_output(None, &output, ctx.quiet)?;
    Ok(EXIT_SUCCESS)
}
