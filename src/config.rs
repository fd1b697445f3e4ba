use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::format::DEFAULT_DECIMAL_PLACES;
use crate::graph::DEFAULT_LENGTH;
use crate::report::disk::DiskReportOptions;
use crate::report::memory::MemoryReportOptions;
use crate::system::du::DEFAULT_DU_COMMAND;
use crate::system::pids::PidLookup;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub memory: MemoryConfig,
    pub disk: DiskConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub length: usize,
    pub human_readable: bool,
    pub decimal_places: usize,
    pub pid_lookup: PidLookup,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        MemoryConfig {
            length: DEFAULT_LENGTH,
            human_readable: false,
            decimal_places: DEFAULT_DECIMAL_PLACES,
            pid_lookup: PidLookup::Pidof,
        }
    }
}

impl MemoryConfig {
    pub fn report_options(&self) -> MemoryReportOptions {
        MemoryReportOptions {
            length: self.length,
            human_readable: self.human_readable,
            decimal_places: self.decimal_places,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiskConfig {
    pub length: usize,
    pub human_readable: bool,
    pub decimal_places: usize,
    pub du_command: String,
}

impl Default for DiskConfig {
    fn default() -> Self {
        DiskConfig {
            length: DEFAULT_LENGTH,
            human_readable: false,
            decimal_places: DEFAULT_DECIMAL_PLACES,
            du_command: DEFAULT_DU_COMMAND.to_string(),
        }
    }
}

impl DiskConfig {
    pub fn report_options(&self) -> DiskReportOptions {
        DiskReportOptions {
            length: self.length,
            human_readable: self.human_readable,
            decimal_places: self.decimal_places,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("resviz").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

/// Reads `path`, falling back to defaults when it is missing or invalid.
pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "ignoring invalid config");
            Config::default()
        }),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "config not readable");
            Config::default()
        }
    }
}

/// An explicit `--config` path wins over the default location.
pub fn load_config_for(path: Option<&Path>) -> Config {
    match path {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    }
}
