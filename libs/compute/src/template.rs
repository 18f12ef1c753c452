//! Instance templates carrying per-request host preferences.

use std::collections::HashMap;

use crate::properties::{optional_value, PREFERRED_HOSTS};
use crate::PoolError;

/// A named request template.
///
/// The preferred-hosts expression is expanded once, when the template is
/// built, so an invalid expression is reported before any allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstanceTemplate {
    /// Template name.
    pub name: String,

    /// Opaque tags, carried for the caller.
    pub tags: HashMap<String, String>,

    /// Hosts to try before falling back to pool order.
    preferred_hosts: Vec<String>,
}

impl InstanceTemplate {
    /// Create a template from an optional preferred-hosts expression.
    pub fn new(name: impl Into<String>, preferred_hosts: Option<&str>) -> Result<Self, PoolError> {
        let preferred_hosts = match preferred_hosts {
            Some(expression) => byon_hostgroups::expand(expression)?,
            None => Vec::new(),
        };

        Ok(Self {
            name: name.into(),
            tags: HashMap::new(),
            preferred_hosts,
        })
    }

    /// Create a template from raw configuration values.
    pub fn from_config(
        name: impl Into<String>,
        values: &HashMap<String, String>,
    ) -> Result<Self, PoolError> {
        Self::new(name, optional_value(values, &PREFERRED_HOSTS))
    }

    /// Attach tags.
    pub fn with_tags(mut self, tags: HashMap<String, String>) -> Self {
        self.tags = tags;
        self
    }

    /// Preferred hosts in expansion order.
    pub fn preferred_hosts(&self) -> &[String] {
        &self.preferred_hosts
    }
}
