pub mod toml_config;

pub use toml_config::{ImportConfig, RepositoryConfig};

#[cfg(feature = "cli")]
use crate::domain::model::{FailurePolicy, HeaderPolicy};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "customer-import")]
#[command(about = "Import customer accounts from CSV, JSON, TXT or XML files")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Application root that sources are resolved against (default: current directory)
    #[arg(long, global = true)]
    pub root_dir: Option<String>,

    /// What to do with the first CSV/TXT line: first_row, detect or none
    #[arg(long, global = true)]
    pub header_policy: Option<HeaderPolicy>,

    /// Reaction to a customer that cannot be saved: abort or continue
    #[arg(long = "on-error", global = true)]
    pub failure_policy: Option<FailurePolicy>,

    /// Customer repository endpoint, overrides the configuration file
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Log the customers that would be created without saving them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Write a JSON report of the import to this file
    #[arg(long, global = true)]
    pub report: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Imports customers from source using specified profile
    #[command(name = "customer:import")]
    CustomerImport {
        /// Profile name
        profile: String,
        /// Source file, relative to the root directory
        source: String,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Load the configuration file (if any) and apply command line overrides.
    pub fn load_import_config(&self) -> crate::Result<ImportConfig> {
        let mut config = match &self.config {
            Some(path) => ImportConfig::from_file(path)?,
            None => ImportConfig::default(),
        };

        // 應用命令列覆蓋設定
        if let Some(root_dir) = &self.root_dir {
            config.import.root_dir = Some(root_dir.clone());
        }
        if let Some(header_policy) = self.header_policy {
            config.import.header_policy = header_policy;
        }
        if let Some(failure_policy) = self.failure_policy {
            config.import.failure_policy = failure_policy;
        }
        if let Some(endpoint) = &self.endpoint {
            config.repository.endpoint = Some(endpoint.clone());
        }

        Ok(config)
    }
}
