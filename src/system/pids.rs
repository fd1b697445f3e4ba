use std::ffi::OsStr;
use std::process::Command;

use serde::Deserialize;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

use super::{MalformedLine, ProbeError};

const PIDOF: &str = "pidof";

/// Looks up the PIDs of every running process with a given program name.
pub trait PidResolver {
    fn resolve(&self, program: &str) -> Result<Vec<u32>, ProbeError>;
}

/// Which [`PidResolver`] a report should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PidLookup {
    #[default]
    Pidof,
    Sysinfo,
}

impl PidLookup {
    pub fn resolver(self) -> Box<dyn PidResolver> {
        match self {
            PidLookup::Pidof => Box::new(Pidof),
            PidLookup::Sysinfo => Box::new(ProcessTable),
        }
    }
}

/// Runs `pidof -- <program>` and reads the PIDs from its stdout.
///
/// `pidof` exits with 1 when nothing matches, so only stdout is consulted.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pidof;

impl PidResolver for Pidof {
    fn resolve(&self, program: &str) -> Result<Vec<u32>, ProbeError> {
        let command = format!("{PIDOF} -- {program}");
        let output = Command::new(PIDOF)
            .arg("--")
            .arg(program)
            .output()
            .map_err(|source| ProbeError::Spawn {
                command: command.clone(),
                source,
            })?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_pid_list(&stdout).map_err(|source| ProbeError::MalformedOutput { command, source })
    }
}

/// Scans the process table for exact name matches, threads excluded.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessTable;

impl PidResolver for ProcessTable {
    fn resolve(&self, program: &str) -> Result<Vec<u32>, ProbeError> {
        let mut sys = System::new();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );
        let mut pids: Vec<u32> = sys
            .processes_by_exact_name(OsStr::new(program))
            .filter(|process| process.thread_kind().is_none())
            .map(|process| process.pid().as_u32())
            .collect();
        // Highest first, the order pidof prints.
        pids.sort_unstable_by(|a, b| b.cmp(a));
        Ok(pids)
    }
}

pub fn parse_pid_list(output: &str) -> Result<Vec<u32>, MalformedLine> {
    output
        .split_whitespace()
        .map(|pid| pid.parse().map_err(|_| MalformedLine(output.trim().to_string())))
        .collect()
}
