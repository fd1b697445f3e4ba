use std::path::Path;

use thiserror::Error;

use crate::format::{DEFAULT_DECIMAL_PLACES, bytes_to_human};
use crate::graph::{DEFAULT_LENGTH, GraphError, percent_bar};
use crate::system::ProbeError;
use crate::system::du::{DirectoryUsage, DiskScanner};

#[derive(Debug, Error)]
pub enum DiskReportError {
    #[error(transparent)]
    Scan(#[from] ProbeError),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskReportOptions {
    pub length: usize,
    pub human_readable: bool,
    pub decimal_places: usize,
}

impl Default for DiskReportOptions {
    fn default() -> Self {
        DiskReportOptions {
            length: DEFAULT_LENGTH,
            human_readable: false,
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }
}

/// `size` as a percentage of `total`, 0 when `total` is 0.
pub fn share_of_total(size: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    size as f64 / total as f64 * 100.0
}

pub fn format_size(size: u64, options: &DiskReportOptions) -> String {
    if options.human_readable {
        bytes_to_human(size, options.decimal_places)
    } else {
        format!("{size} B")
    }
}

pub fn render_entry(
    entry: &DirectoryUsage,
    total: u64,
    options: &DiskReportOptions,
) -> Result<String, GraphError> {
    let percent = share_of_total(entry.size, total);
    let bar = percent_bar(percent, options.length)?;
    Ok(format!(
        "{percent:>3.0}% [{bar}] {size}\t{path}",
        size = format_size(entry.size, options),
        path = entry.path,
    ))
}

pub fn render_total(total: u64, target: &str, options: &DiskReportOptions) -> String {
    format!("Total: {}   {target}", format_size(total, options))
}

/// Every entry in scan order, then the `Total:` line.
pub fn render_report(
    target: &str,
    entries: &[DirectoryUsage],
    options: &DiskReportOptions,
) -> Result<Vec<String>, GraphError> {
    let total: u64 = entries.iter().map(|entry| entry.size).sum();
    let mut lines = entries
        .iter()
        .map(|entry| render_entry(entry, total, options))
        .collect::<Result<Vec<_>, _>>()?;
    lines.push(render_total(total, target, options));
    Ok(lines)
}

pub fn build_report(
    scanner: &dyn DiskScanner,
    target: &Path,
    options: &DiskReportOptions,
) -> Result<Vec<String>, DiskReportError> {
    let _span = tracing::debug_span!("disk.build_report", target = %target.display()).entered();

    let entries = scanner.scan(target)?;
    let target = target.display().to_string();
    Ok(render_report(&target, &entries, options)?)
}
