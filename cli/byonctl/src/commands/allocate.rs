//! Allocation from the configured pool.

use anyhow::{Context, Result};
use byon_compute::{AllocatedInstance, HostPool, InstanceStatus, InstanceTemplate};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;
use ulid::Ulid;

use crate::output::{print_info, print_json, print_output, OutputFormat};

use super::CommandContext;

/// Allocate hosts for new instances.
#[derive(Debug, Args)]
pub struct AllocateCommand {
    /// Number of instance identifiers to allocate.
    #[arg(long)]
    count: usize,

    /// Minimum number of hosts that must be available (defaults to --count).
    #[arg(long)]
    min_count: Option<usize>,

    /// Preferred-hosts expression, overriding the configuration.
    #[arg(long)]
    preferred: Option<String>,

    /// Template name recorded in the logs.
    #[arg(long, default_value = "default")]
    template: String,
}

#[derive(Debug, Serialize, Tabled)]
struct InstanceRow {
    #[tabled(rename = "ID")]
    id: String,

    #[tabled(rename = "Host")]
    host: String,

    #[tabled(rename = "Address")]
    address: String,

    #[tabled(rename = "Status")]
    status: InstanceStatus,
}

impl InstanceRow {
    fn new(instance: &AllocatedInstance, status: InstanceStatus) -> Self {
        Self {
            id: instance.id.clone(),
            host: instance.host.clone(),
            address: instance.address.to_string(),
            status,
        }
    }
}

#[derive(Debug, Serialize)]
struct AllocateReport<'a> {
    template: &'a str,
    instances: &'a [AllocatedInstance],
    available: usize,
}

impl AllocateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let provider = ctx.config.provider_config()?;
        let pool = HostPool::from_config(&provider).context("Failed to build host pool")?;

        let preferred = self.preferred.as_deref().or(ctx.config.preferred_hosts.as_deref());
        let template = InstanceTemplate::new(self.template.as_str(), preferred)?;

        let instance_ids = generate_ids(self.count);
        let min_count = self.min_count.unwrap_or(self.count);

        let allocated = pool.allocate_template(&template, &instance_ids, min_count)?;
        info!(
            template = %template.name,
            allocated = allocated.len(),
            available = pool.available_count(),
            "Allocation complete"
        );

        match ctx.format {
            OutputFormat::Table => {
                let rows: Vec<InstanceRow> = allocated
                    .iter()
                    .map(|i| InstanceRow::new(i, InstanceStatus::Running))
                    .collect();

                print_output(&rows, ctx.format);
                print_info(&format!(
                    "{} of {} requested instances allocated, {} hosts left",
                    allocated.len(),
                    self.count,
                    pool.available_count()
                ));
            }
            OutputFormat::Json => print_json(&AllocateReport {
                template: &template.name,
                instances: &allocated,
                available: pool.available_count(),
            }),
        }

        Ok(())
    }
}

/// Generate unique instance identifiers.
fn generate_ids(count: usize) -> Vec<String> {
    (0..count)
        .map(|_| format!("inst_{}", Ulid::new()))
        .collect()
}
