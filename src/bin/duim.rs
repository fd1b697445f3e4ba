use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use color_eyre::Result;
use resviz::config::load_config_for;
use resviz::logging::init_tracing;
use resviz::report::disk::{DiskReportError, build_report};
use resviz::system::du::DuCommand;

#[derive(Parser)]
#[command(
    name = "duim",
    version,
    about = "DU Improved -- See Disk Usage Report with bar charts",
    after_help = "Copyright 2023"
)]
struct Cli {
    /// Print sizes in human readable format (e.g., 1K 23M 2G)
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

    /// The directory to scan.
    #[arg(default_value = ".")]
    target: String,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if cli.target.is_empty() {
        eprintln!("Error: Target directory not specified.");
        return Ok(ExitCode::FAILURE);
    }

    let config = load_config_for(cli.config.as_deref()).disk;
    let mut options = config.report_options();
    if let Some(length) = cli.length {
        options.length = length;
    }
    options.human_readable |= cli.human_readable;

    let scanner = DuCommand::new(config.du_command);
    match build_report(&scanner, Path::new(&cli.target), &options) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(DiskReportError::Scan(err)) => {
            eprintln!("Error running 'du' on {}: {err}", cli.target);
            eprintln!(
                "Error: Failed to retrieve disk usage information for {}.",
                cli.target
            );
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}
