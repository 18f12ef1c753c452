//! CLI commands.

mod allocate;
mod expand;
mod properties;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::OutputFormat;

/// byonctl - Expand host groups and allocate hosts from a static pool.
#[derive(Debug, Parser)]
#[command(name = "byonctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pool expression, overriding the configuration.
    #[arg(long, global = true)]
    hosts: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Expand a host group expression into single hosts.
    Expand(expand::ExpandCommand),

    /// Allocate hosts from the configured pool.
    Allocate(allocate::AllocateCommand),

    /// List the configuration properties.
    Properties,

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Load configuration, applying command line overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(hosts) = &self.hosts {
            config.hosts = Some(hosts.clone());
        }
        Ok(config)
    }

    /// Run the CLI command.
    pub fn run(self, config: Config) -> Result<()> {
        let ctx = CommandContext {
            config,
            format: OutputFormat::parse(&self.format),
        };

        match self.command {
            Commands::Expand(cmd) => cmd.run(ctx),
            Commands::Allocate(cmd) => cmd.run(ctx),
            Commands::Properties => properties::run(ctx),
            Commands::Version => {
                println!("byonctl {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
}
