pub mod du;
pub mod meminfo;
pub mod pids;
pub mod smaps;

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// A line of kernel or command output that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed line: `{0}`")]
pub struct MalformedLine(pub String);

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} contains a {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: MalformedLine,
    },
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` exited with {status}")]
    Status { command: String, status: ExitStatus },
    #[error("`{command}` produced no output")]
    EmptyOutput { command: String },
    #[error("`{command}` printed a {source}")]
    MalformedOutput {
        command: String,
        #[source]
        source: MalformedLine,
    },
}
