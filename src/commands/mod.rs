pub mod context;
pub mod delete;
pub mod init;
pub mod scan;
pub mod stats;
pub mod whitelist;

pub use context::{CommandContext, ProjectSession, write_output};
pub use delete::{run_delete, run_delete_impl};
pub use init::{generate_config_template, run_init, run_init_impl};
pub use scan::{run_scan, run_scan_impl};
pub use stats::{run_stats, run_stats_impl};
pub use whitelist::{run_whitelist, run_whitelist_add_impl, run_whitelist_list_impl};

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
