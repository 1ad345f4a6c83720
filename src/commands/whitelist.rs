use crate::cli::{Cli, WhitelistAction, WhitelistArgs};
use crate::error::Result;
use crate::output::{OutputFormat, WhitelistReport};
use crate::whitelist::{Whitelist, normalize_entry};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::{CommandContext, write_output};

#[must_use]
pub fn run_whitelist(args: &WhitelistArgs, cli: &Cli) -> i32 {
    let result = CommandContext::from_cli(cli).and_then(|ctx| match &args.action {
        WhitelistAction::Add { paths } => run_whitelist_add_impl(paths, &ctx),
        WhitelistAction::List { format } => run_whitelist_list_impl(*format, &ctx),
    });
    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Exempt each path (and its `.meta` sidecar) from detection.
///
/// Entries are validated before anything is stored, so a malformed entry
/// leaves the whitelist untouched.
///
/// # Errors
/// Returns an error for a malformed entry or if the project cannot be indexed.
pub fn run_whitelist_add_impl(paths: &[String], ctx: &CommandContext) -> Result<i32> {
    let entries: Vec<String> = paths.iter().map(|p| ctx.relative_entry(p)).collect();
    for entry in &entries {
        normalize_entry(entry)?;
    }

    let mut session = ctx.open_session()?;
    if let Some(warning) = session.storage_warning() {
        eprintln!("Warning: {warning}; changes will not be saved");
    }

    let mut unsaved = None;
    for entry in &entries {
        let outcome = session.add_to_whitelist(entry)?;
        if !ctx.quiet {
            if outcome.added.is_empty() {
                println!("Already whitelisted: {entry}");
            }
            for added in &outcome.added {
                println!("Whitelisted: {added}");
            }
        }
        if outcome.warning.is_some() {
            unsaved = outcome.warning;
        }
    }
    if let Some(warning) = unsaved {
        eprintln!("Warning: {warning}; changes kept in memory only");
    }
    Ok(EXIT_SUCCESS)
}

/// Print the stored whitelist.
///
/// # Errors
/// Returns an error if the output cannot be formatted.
pub fn run_whitelist_list_impl(format: OutputFormat, ctx: &CommandContext) -> Result<i32> {
    let (whitelist, warning) = Whitelist::load(&ctx.storage());
    if let Some(warning) = warning {
        eprintln!("Warning: {warning}");
    }
    let report = WhitelistReport::from(&whitelist);
    let output = format.formatter(ctx.color).format_whitelist(&report)?;
    write_output(None, &output, ctx.quiet)?;
    Ok(EXIT_SUCCESS)
}
