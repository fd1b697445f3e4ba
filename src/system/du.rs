use std::path::Path;
use std::process::{Command, Stdio};

use super::{MalformedLine, ProbeError};

pub const DEFAULT_DU_COMMAND: &str = "du";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryUsage {
    pub path: String,
    pub size: u64,
}

/// Sizes of the immediate children of a directory.
pub trait DiskScanner {
    fn scan(&self, target: &Path) -> Result<Vec<DirectoryUsage>, ProbeError>;
}

/// Runs `<program> -d 1 -- <target>` and parses its tab separated output.
#[derive(Debug, Clone)]
pub struct DuCommand {
    program: String,
}

impl DuCommand {
    pub fn new(program: impl Into<String>) -> Self {
        DuCommand {
            program: program.into(),
        }
    }
}

impl Default for DuCommand {
    fn default() -> Self {
        Self::new(DEFAULT_DU_COMMAND)
    }
}

impl DiskScanner for DuCommand {
    fn scan(&self, target: &Path) -> Result<Vec<DirectoryUsage>, ProbeError> {
        let _span = tracing::debug_span!("du.scan", target = %target.display()).entered();

        let command = format!("{} -d 1 -- {}", self.program, target.display());
        let output = Command::new(&self.program)
            .args(["-d", "1", "--"])
            .arg(target)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| ProbeError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::Status {
                command,
                status: output.status,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            return Err(ProbeError::EmptyOutput { command });
        }
        let entries = parse_du_output(&stdout)
            .map_err(|source| ProbeError::MalformedOutput { command, source })?;
        tracing::debug!(entries = entries.len(), "du scan complete");
        Ok(entries)
    }
}

/// Parses `<size>\t<path>` lines, keeping output order.
///
/// A path seen twice keeps its first position and takes the later size.
pub fn parse_du_output(output: &str) -> Result<Vec<DirectoryUsage>, MalformedLine> {
    let mut entries: Vec<DirectoryUsage> = Vec::new();
    for line in output.trim().lines() {
        let (size, path) = line
            .split_once('\t')
            .ok_or_else(|| MalformedLine(line.to_string()))?;
        let size: u64 = size
            .trim()
            .parse()
            .map_err(|_| MalformedLine(line.to_string()))?;

        match entries.iter_mut().find(|entry| entry.path == path) {
            Some(existing) => existing.size = size,
            None => entries.push(DirectoryUsage {
                path: path.to_string(),
                size,
            }),
        }
    }
    Ok(entries)
}
