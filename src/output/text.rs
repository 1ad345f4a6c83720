use std::fmt::Write;

use crate::error::Result;

use super::report::{FolderReport, ScanReport, StatsReport, WhitelistReport, format_size};
use super::ReportFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

const INDENT: &str = "  ";

pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    fn write_folder(&self, out: &mut String, folder: &FolderReport, selected: bool, list: bool) {
        let indent = INDENT.repeat(folder.depth);
        let marker = if selected { "> " } else { "" };
        let key = folder.key.to_string();
        writeln!(
            out,
            "{indent}{marker}{} ({} assets, {})",
            self.paint(&key, ansi::CYAN),
            folder.assets.len(),
            format_size(folder.total_bytes())
        )
        .ok();

        if !list {
            return;
        }
        for asset in &folder.assets {
            let size = asset
                .size
                .map_or_else(|| "missing".to_string(), format_size);
            writeln!(
                out,
                "{indent}{INDENT}{} {}",
                asset.path,
                self.paint(&format!("({size})"), ansi::DIM)
            )
            .ok();
        }
    }
}

impl ReportFormatter for TextFormatter {
    fn format_scan(&self, report: &ScanReport) -> Result<String> {
        let mut out = String::new();

        if let Some(warning) = &report.whitelist_warning {
            writeln!(
                out,
                "{} {warning} (whitelist changes are kept in memory only)",
                self.paint("warning:", ansi::YELLOW)
            )
            .ok();
        }

        if report.is_empty() {
            writeln!(out, "{}", self.paint("No unused assets found.", ansi::GREEN)).ok();
            return Ok(out);
        }

        for folder in &report.folders {
            let selected = report.selection.as_ref() == Some(&folder.key);
            let list = !report.focused || selected;
            self.write_folder(&mut out, folder, selected && report.focused, list);
        }

        writeln!(out).ok();
        writeln!(
            out,
            "{}: {} assets in {} folders, {}",
            self.paint("Unused", ansi::RED),
            report.summary.unused_count,
            report.summary.folder_count,
            format_size(report.summary.total_bytes)
        )
        .ok();
        Ok(out)
    }

    fn format_stats(&self, report: &StatsReport) -> Result<String> {
        let mut out = String::new();
        if let Some(scan) = &report.scan {
            writeln!(out, "Assets:       {}", scan.total_assets).ok();
            writeln!(out, "Reachable:    {}", scan.used).ok();
            writeln!(out, "Excluded:     {}", scan.excluded).ok();
            writeln!(out, "Whitelisted:  {}", scan.whitelisted).ok();
        }
        writeln!(out, "Unused:       {}", report.unused.unused_count).ok();
        writeln!(out, "Folders:      {}", report.unused.folder_count).ok();
        writeln!(
            out,
            "Reclaimable:  {}",
            format_size(report.unused.total_bytes)
        )
        .ok();
        writeln!(out, "Whitelist:    {} entries", report.whitelist_entries).ok();
        Ok(out)
    }

    fn format_whitelist(&self, report: &WhitelistReport) -> Result<String> {
        let mut out = String::new();
        if report.memory_only {
            writeln!(
                out,
                "{} whitelist storage unavailable, showing in-memory entries",
                self.paint("warning:", ansi::YELLOW)
            )
            .ok();
        }
        if report.folders.is_empty() && report.files.is_empty() {
            writeln!(out, "Whitelist is empty.").ok();
            return Ok(out);
        }
        for (title, entries) in [("Folders", &report.folders), ("Files", &report.files)] {
            if entries.is_empty() {
                continue;
            }
            writeln!(out, "{}:", self.paint(title, ansi::CYAN)).ok();
            for entry in entries {
                writeln!(out, "{INDENT}{entry}").ok();
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
