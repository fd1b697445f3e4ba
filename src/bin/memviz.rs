use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use color_eyre::Result;
use resviz::config::load_config_for;
use resviz::logging::init_tracing;
use resviz::report::memory::{MemoryReport, ProcSource, build_report};

#[derive(Parser)]
#[command(
    name = "memviz",
    version,
    about = "Memory Visualiser -- See Memory Usage Report with bar charts",
    after_help = "Copyright 2023"
)]
struct Cli {
    /// Prints sizes in human readable format
    #[arg(short = 'H', long)]
    human_readable: bool,

    /// Specify the length of the graph. Default is 20.
    #[arg(short, long)]
    length: Option<usize>,

    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log to stderr: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// If a program is specified, show memory use of all associated processes. Show only total use if not.
    program: Option<String>,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = load_config_for(cli.config.as_deref()).memory;
    let mut options = config.report_options();
    if let Some(length) = cli.length {
        options.length = length;
    }
    options.human_readable |= cli.human_readable;

    let source = ProcSource::new(config.pid_lookup.resolver());
    // An empty name asks for the system-wide report, like no name at all.
    let program = cli.program.as_deref().filter(|p| !p.is_empty());
    let report = build_report(&source, program)?;

    for line in report.render(&options) {
        println!("{line}");
    }

    match report {
        MemoryReport::ProgramNotFound(_) => Ok(ExitCode::FAILURE),
        MemoryReport::Usage(_) => Ok(ExitCode::SUCCESS),
    }
}
