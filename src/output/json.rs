use serde::Serialize;

use crate::error::Result;

use super::report::{ScanReport, StatsReport, WhitelistReport};
use super::ReportFormatter;

pub struct JsonFormatter;

impl JsonFormatter {
    fn render<T: Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_scan(&self, report: &ScanReport) -> Result<String> {
        Self::render(report)
    }

    fn format_stats(&self, report: &StatsReport) -> Result<String> {
        Self::render(report)
    }

    fn format_whitelist(&self, report: &WhitelistReport) -> Result<String> {
        Self::render(report)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
