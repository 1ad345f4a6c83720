use crate::asset::AssetPath;
use crate::cli::{Cli, DeleteArgs};
use crate::error::{DeleteError, Result};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::CommandContext;

#[must_use]
pub fn run_delete(args: &DeleteArgs, cli: &Cli) -> i32 {
    match CommandContext::from_cli(cli).and_then(|ctx| run_delete_impl(args, &ctx)) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Scan, then delete the requested unused assets.
///
/// Without `--yes` nothing is removed; the assets that would be deleted are
/// listed instead. Paths that are not listed as unused are refused. Returns
/// [`EXIT_CONFIG_ERROR`] if any requested path was refused or failed.
///
/// # Errors
/// Returns an error if the project cannot be indexed.
pub fn run_delete_impl(args: &DeleteArgs, ctx: &CommandContext) -> Result<i32> {
    let mut session = ctx.open_session()?;
    session.scan();

    let targets: Vec<AssetPath> = if args.all {
        session.flat().to_vec()
    } else {
        args.paths.iter().map(|p| ctx.asset_path(p)).collect()
    };

    let mut failed = 0usize;
    if args.yes {
        for (path, result) in session.delete_many(&targets) {
            match result {
                Ok(()) => {
                    if !ctx.quiet {
                        println!("Deleted: {path}");
                    }
                }
                Err(e) => {
                    failed += 1;
                    report_failure(&e);
                }
            }
        }
    } else {
        for path in &targets {
            if session.unused().contains(path) {
                if !ctx.quiet {
                    println!("Would delete: {path}");
                }
            } else {
                failed += 1;
                report_failure(&DeleteError::NotIndexed(path.clone()));
            }
        }
        if !ctx.quiet && !targets.is_empty() && failed < targets.len() {
            println!("Dry run: pass --yes to delete.");
        }
    }

    Ok(if failed == 0 {
        EXIT_SUCCESS
    } else {
        EXIT_CONFIG_ERROR
    })
}

fn report_failure(error: &DeleteError) {
    match error {
        DeleteError::Store { source, .. } => eprintln!("Error: {error}: {source}"),
        DeleteError::NotIndexed(_) => eprintln!("Error: {error}"),
    }
}
