// Module exports for CLI subcommands.
//
// Each module handles one subcommand. main.rs dispatches to these handlers.

pub mod resolve;
pub mod route;

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use navroute_lib::{load_navdata, BuildOptions, Network};

/// Environment variable consulted when `--data-dir` is not given.
pub const DATA_DIR_ENV: &str = "NAVROUTE_DATA_DIR";

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub data_dir: Option<PathBuf>,
    pub lenient: bool,
}

impl GlobalOptions {
    /// Data directory from the flag, then the environment, then the working directory.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        match env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
            _ => env::current_dir().context("failed to determine the current directory"),
        }
    }

    pub fn build_options(&self) -> BuildOptions {
        if self.lenient {
            BuildOptions::lenient()
        } else {
            BuildOptions::default()
        }
    }

    /// Read the navigation data directory and build the route network.
    pub fn load_network(&self) -> Result<Network> {
        let dir = self.resolve_data_dir()?;
        debug!(dir = %dir.display(), lenient = self.lenient, "resolved data directory");
        load(&dir, &self.build_options())
    }
}

fn load(dir: &Path, options: &BuildOptions) -> Result<Network> {
    load_navdata(dir, options)
        .with_context(|| format!("failed to load navdata from {}", dir.display()))
}
