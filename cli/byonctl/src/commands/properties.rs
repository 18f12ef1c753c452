//! Configuration property listing.

use anyhow::Result;
use byon_compute::properties::{ConfigProperty, PropertyScope, CONFIG_PROPERTIES};
use serde::Serialize;
use tabled::Tabled;

use crate::output::print_output;

use super::CommandContext;

#[derive(Debug, Serialize, Tabled)]
struct PropertyRow {
    #[tabled(rename = "Key")]
    key: &'static str,

    #[tabled(rename = "Scope")]
    scope: &'static str,

    #[tabled(rename = "Required")]
    required: bool,

    #[tabled(rename = "Default")]
    default_value: &'static str,

    #[tabled(rename = "Description")]
    description: &'static str,
}

impl From<&ConfigProperty> for PropertyRow {
    fn from(p: &ConfigProperty) -> Self {
        Self {
            key: p.key,
            scope: match p.scope {
                PropertyScope::Provider => "provider",
                PropertyScope::Template => "template",
            },
            required: p.required,
            default_value: p.default_value.unwrap_or("-"),
            description: p.description,
        }
    }
}

pub fn run(ctx: CommandContext) -> Result<()> {
    let rows: Vec<PropertyRow> = CONFIG_PROPERTIES.iter().map(PropertyRow::from).collect();
    print_output(&rows, ctx.format);
    Ok(())
}
