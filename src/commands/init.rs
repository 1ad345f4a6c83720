use std::fs;

use crate::cli::{Cli, InitArgs};
use crate::error::{AssetGuardError, Result};
use crate::state::config_path;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::resolve_project_root;

#[must_use]
pub fn run_init(args: &InitArgs, cli: &Cli) -> i32 {
    match run_init_impl(args, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Write a default configuration file.
///
/// Without `--output` the file goes to the project directory (`-C`) or the
/// current directory. An existing config is never loaded, so a broken one
/// can be replaced with `--force`.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs, cli: &Cli) -> Result<()> {
    let output_path = match (&args.output, cli.project.as_deref()) {
        (Some(path), _) => path.clone(),
        (None, Some(dir)) => config_path(&resolve_project_root(Some(dir))?),
        (None, None) => config_path(&std::env::current_dir()?),
    };

    if output_path.exists() && !args.force {
        return Err(AssetGuardError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(&output_path, generate_config_template())?;

    if !cli.quiet {
        println!("Created configuration file: {}", output_path.display());
    }
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r#"# asset-guard configuration file
version = "1"

[scanner]
# Respect .gitignore while walking the project (default: true)
gitignore = true
# Never enumerate these (glob syntax, project-relative)
exclude = [
    "**/.git/**",
    "Library/**",
    "Temp/**",
]

[roots]
# Files matching these patterns are entry points
patterns = ["**/*.unity"]
# Extra entry points by path
# paths = ["Assets/Resources/Boot.prefab"]

[dependencies]
# JSON object mapping each path to the paths it references directly:
# { "Assets/Scenes/Main.unity": ["Assets/Art/hero.png"] }
# manifest = "asset-deps.json"

[exclusions]
# Contents of directories with these names are never reported
internal_segments = ["Editor"]
# Only report paths starting with this prefix
# asset_scope = "Assets/"

[whitelist]
# "json" (folders/files record) or "lines" (one path per line)
format = "json"
# path = ".asset-guard-whitelist.json"
"#
    .to_string()
}
