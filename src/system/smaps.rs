use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::{MalformedLine, ProbeError};

const RSS: &str = "Rss:";

pub fn smaps_path(pid: u32) -> PathBuf {
    PathBuf::from(format!("/proc/{pid}/smaps"))
}

/// Resident set size of `pid` in KiB, summed over every mapping.
pub fn process_rss(pid: u32) -> Result<u64, ProbeError> {
    process_rss_from(&smaps_path(pid))
}

pub fn process_rss_from(path: &Path) -> Result<u64, ProbeError> {
    let read_error = |source: std::io::Error| ProbeError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_error)?;
    sum_rss(BufReader::new(file), path)
}

/// Sums every `Rss:` line of an smaps listing; `path` only labels errors.
pub fn sum_rss(reader: impl BufRead, path: &Path) -> Result<u64, ProbeError> {
    let mut total = 0u64;
    for line in reader.lines() {
        let line = line.map_err(|source| ProbeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let rss = rss_kib(&line).map_err(|source| ProbeError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        total += rss.unwrap_or(0);
    }
    Ok(total)
}

fn rss_kib(line: &str) -> Result<Option<u64>, MalformedLine> {
    let Some(rest) = line.strip_prefix(RSS) else {
        return Ok(None);
    };
    rest.split_whitespace()
        .next()
        .and_then(|value| value.parse().ok())
        .map(Some)
        .ok_or_else(|| MalformedLine(line.to_string()))
}
