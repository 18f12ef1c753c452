//! Host group expansion.

use anyhow::Result;
use clap::Args;

use crate::output::{print_json, OutputFormat};

use super::CommandContext;

/// Expand a host group expression.
#[derive(Debug, Args)]
pub struct ExpandCommand {
    /// Host group expression, e.g. "cluster-[1-5].example.com, 192.168.0.{4..10}".
    expression: String,
}

impl ExpandCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let hosts = byon_hostgroups::expand(&self.expression)?;

        match ctx.format {
            OutputFormat::Table => {
                for host in &hosts {
                    println!("{}", host);
                }
            }
            OutputFormat::Json => print_json(&hosts),
        }

        Ok(())
    }
}
