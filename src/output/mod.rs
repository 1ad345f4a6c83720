mod json;
mod progress;
mod report;
mod text;

pub use json::JsonFormatter;
pub use progress::ScanProgress;
pub use report::{
    AssetReport, FolderReport, ScanReport, StatsReport, WhitelistReport, format_size,
};
pub use text::{ColorMode, TextFormatter};

use crate::error::Result;

/// Renders reports into one output format.
pub trait ReportFormatter {
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_scan(&self, report: &ScanReport) -> Result<String>;

    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_stats(&self, report: &StatsReport) -> Result<String>;

    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_whitelist(&self, report: &WhitelistReport) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn formatter(self, color: ColorMode) -> Box<dyn ReportFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter::new(color)),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
