use std::fs;
use std::path::Path;

use super::{MalformedLine, ProbeError};

pub const MEMINFO_PATH: &str = "/proc/meminfo";

const MEM_TOTAL: &str = "MemTotal:";
const MEM_AVAILABLE: &str = "MemAvailable:";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemorySnapshot {
    pub total_kib: u64,
    pub available_kib: u64,
}

impl MemorySnapshot {
    pub fn used_kib(&self) -> u64 {
        self.total_kib.saturating_sub(self.available_kib)
    }
}

pub fn read_meminfo() -> Result<MemorySnapshot, ProbeError> {
    read_meminfo_from(Path::new(MEMINFO_PATH))
}

pub fn read_meminfo_from(path: &Path) -> Result<MemorySnapshot, ProbeError> {
    let contents = read(path)?;
    parse_meminfo(&contents).map_err(|source| ProbeError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// `MemTotal` in KiB, or 0 when the field is missing.
pub fn system_total() -> Result<u64, ProbeError> {
    read_field(Path::new(MEMINFO_PATH), MEM_TOTAL)
}

/// `MemAvailable` in KiB, or 0 when the field is missing.
pub fn system_available() -> Result<u64, ProbeError> {
    read_field(Path::new(MEMINFO_PATH), MEM_AVAILABLE)
}

pub fn parse_meminfo(contents: &str) -> Result<MemorySnapshot, MalformedLine> {
    Ok(MemorySnapshot {
        total_kib: field_kib(contents, MEM_TOTAL)?,
        available_kib: field_kib(contents, MEM_AVAILABLE)?,
    })
}

/// Value of the first line starting with `key`, 0 if there is none.
pub fn field_kib(contents: &str, key: &str) -> Result<u64, MalformedLine> {
    let Some(line) = contents.lines().find(|line| line.starts_with(key)) else {
        return Ok(0);
    };
    line.split_whitespace()
        .nth(1)
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| MalformedLine(line.to_string()))
}

fn read_field(path: &Path, key: &str) -> Result<u64, ProbeError> {
    let contents = read(path)?;
    field_kib(&contents, key).map_err(|source| ProbeError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, ProbeError> {
    fs::read_to_string(path).map_err(|source| ProbeError::Read {
        path: path.to_path_buf(),
        source,
    })
}
