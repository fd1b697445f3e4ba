use tracing::debug;

use crate::format::{DEFAULT_DECIMAL_PLACES, kibibytes_to_human};
use crate::graph::{DEFAULT_LENGTH, ratio_bar};
use crate::system::ProbeError;
use crate::system::meminfo::{self, MemorySnapshot};
use crate::system::pids::PidResolver;
use crate::system::smaps;

pub const SYSTEM_LABEL: &str = "Memory";

const SYSTEM_LABEL_WIDTH: usize = 14;
const ENTITY_LABEL_WIDTH: usize = 10;

/// Where the memory report gets its numbers from.
pub trait MemorySource {
    fn snapshot(&self) -> Result<MemorySnapshot, ProbeError>;
    fn pids_of(&self, program: &str) -> Result<Vec<u32>, ProbeError>;
    fn process_rss(&self, pid: u32) -> Result<u64, ProbeError>;
}

/// Reads `/proc` and resolves PIDs with the given resolver.
pub struct ProcSource {
    resolver: Box<dyn PidResolver>,
}

impl ProcSource {
    pub fn new(resolver: Box<dyn PidResolver>) -> Self {
        ProcSource { resolver }
    }
}

impl MemorySource for ProcSource {
    fn snapshot(&self) -> Result<MemorySnapshot, ProbeError> {
        meminfo::read_meminfo()
    }

    fn pids_of(&self, program: &str) -> Result<Vec<u32>, ProbeError> {
        self.resolver.resolve(program)
    }

    fn process_rss(&self, pid: u32) -> Result<u64, ProbeError> {
        smaps::process_rss(pid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessMemory {
    pub pid: u32,
    pub resident_kib: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryReportOptions {
    pub length: usize,
    pub human_readable: bool,
    pub decimal_places: usize,
}

impl Default for MemoryReportOptions {
    fn default() -> Self {
        MemoryReportOptions {
            length: DEFAULT_LENGTH,
            human_readable: false,
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }
}

/// One rendered row: `label [bar| pct%] used/total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageLine {
    pub label: String,
    pub label_width: usize,
    pub used_kib: u64,
    pub total_kib: u64,
}

impl UsageLine {
    pub fn ratio(&self) -> f64 {
        if self.total_kib == 0 {
            return 0.0;
        }
        self.used_kib as f64 / self.total_kib as f64
    }

    pub fn render(&self, options: &MemoryReportOptions) -> String {
        let ratio = self.ratio();
        let (used, total) = if options.human_readable {
            (
                kibibytes_to_human(self.used_kib, options.decimal_places),
                kibibytes_to_human(self.total_kib, options.decimal_places),
            )
        } else {
            (self.used_kib.to_string(), self.total_kib.to_string())
        };
        format!(
            "{label:<width$} [{bar}| {percent:.0}%] {used}/{total}",
            label = self.label,
            width = self.label_width,
            bar = ratio_bar(ratio, options.length),
            percent = ratio * 100.0,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryReport {
    Usage(Vec<UsageLine>),
    ProgramNotFound(String),
}

impl MemoryReport {
    pub fn render(&self, options: &MemoryReportOptions) -> Vec<String> {
        match self {
            MemoryReport::Usage(lines) => {
                lines.iter().map(|line| line.render(options)).collect()
            }
            MemoryReport::ProgramNotFound(program) => {
                vec![format!("{program} not found.")]
            }
        }
    }
}

pub fn system_usage(snapshot: MemorySnapshot) -> UsageLine {
    UsageLine {
        label: SYSTEM_LABEL.to_string(),
        label_width: SYSTEM_LABEL_WIDTH,
        used_kib: snapshot.used_kib(),
        total_kib: snapshot.total_kib,
    }
}

/// One line per process, each against total system memory, then a summary
/// line for the program with the summed RSS.
pub fn program_usage(
    program: &str,
    processes: &[ProcessMemory],
    total_kib: u64,
) -> Vec<UsageLine> {
    let mut lines: Vec<UsageLine> = processes
        .iter()
        .map(|process| UsageLine {
            label: process.pid.to_string(),
            label_width: ENTITY_LABEL_WIDTH,
            used_kib: process.resident_kib,
            total_kib,
        })
        .collect();
    lines.push(UsageLine {
        label: program.to_string(),
        label_width: ENTITY_LABEL_WIDTH,
        used_kib: processes.iter().map(|p| p.resident_kib).sum(),
        total_kib,
    });
    lines
}

/// PIDs of `program`; a failed lookup is reported as no PIDs.
pub fn resolve_pids(source: &dyn MemorySource, program: &str) -> Vec<u32> {
    source.pids_of(program).unwrap_or_else(|err| {
        debug!(program, error = %err, "pid lookup failed");
        Vec::new()
    })
}

/// RSS of every PID; a process that cannot be read counts as 0 KiB.
pub fn collect_process_memory(source: &dyn MemorySource, pids: &[u32]) -> Vec<ProcessMemory> {
    pids.iter()
        .map(|&pid| {
            let resident_kib = source.process_rss(pid).unwrap_or_else(|err| {
                debug!(pid, error = %err, "rss lookup failed, counting as zero");
                0
            });
            ProcessMemory { pid, resident_kib }
        })
        .collect()
}

pub fn build_report(
    source: &dyn MemorySource,
    program: Option<&str>,
) -> Result<MemoryReport, ProbeError> {
    let _span = tracing::debug_span!("memory.build_report", program).entered();

    let Some(program) = program else {
        let snapshot = source.snapshot()?;
        return Ok(MemoryReport::Usage(vec![system_usage(snapshot)]));
    };

    let pids = resolve_pids(source, program);
    if pids.is_empty() {
        return Ok(MemoryReport::ProgramNotFound(program.to_string()));
    }

    let snapshot = source.snapshot()?;
    let processes = collect_process_memory(source, &pids);
    Ok(MemoryReport::Usage(program_usage(
        program,
        &processes,
        snapshot.total_kib,
    )))
}
