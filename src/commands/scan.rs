use tracing::warn;

use crate::cli::{Cli, ScanArgs};
use crate::error::Result;
use crate::output::ScanReport;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_UNUSED_FOUND};

use super::context::{CommandContext, write_output};

#[must_use]
pub fn run_scan(args: &ScanArgs, cli: &Cli) -> i32 {
    match CommandContext::from_cli(cli).and_then(|ctx| run_scan_impl(args, &ctx)) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Scan the project and write the folder-grouped report.
///
/// Returns [`EXIT_UNUSED_FOUND`] when anything is unused.
///
/// # Errors
/// Returns an error if the project cannot be indexed or the report cannot be written.
pub fn run_scan_impl(args: &ScanArgs, ctx: &CommandContext) -> Result<i32> {
    let mut session = ctx.open_session()?;
    session.scan();

    if let Some(folder) = &args.folder {
        let key = ctx.asset_path(folder);
        if session.select_folder(&key).is_none() {
            warn!(folder = %key, "folder has no unused assets");
        }
    }

    let report = ScanReport::from_session(&session).with_focus(args.folder.is_some());
    let formatter = args.format.formatter(ctx.color);
    let output = formatter.format_scan(&report)?;
    write_output(args.output.as_deref(), &output, ctx.quiet)?;

    Ok(if session.flat().is_empty() {
        EXIT_SUCCESS
    } else {
        EXIT_UNUSED_FOUND
    })
}
