//! Configuration property metadata and typed provider configuration.
//!
//! The property table describes the keys a provider shell has to collect.
//! The pool itself only consumes the parsed values.

use std::collections::HashMap;

use serde::Serialize;

use crate::PoolError;

/// Where a configuration property is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyScope {
    /// Set once for the provider, used to build the pool.
    Provider,

    /// Set per instance template.
    Template,
}

/// Metadata for a single configuration property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigProperty {
    pub key: &'static str,
    pub name: &'static str,
    pub scope: PropertyScope,
    pub required: bool,
    pub default_value: Option<&'static str>,
    pub description: &'static str,
    pub sensitive: bool,
}

/// The pool expression.
pub const HOSTS: ConfigProperty = ConfigProperty {
    key: "hosts",
    name: "Hosts",
    scope: PropertyScope::Provider,
    required: true,
    default_value: None,
    description: "A comma separated list of host group patterns to be used for allocations. \
                  On termination allocated hosts are not returned to the pool.",
    sensitive: false,
};

/// The preferred-hosts expression of a template.
pub const PREFERRED_HOSTS: ConfigProperty = ConfigProperty {
    key: "preferredHosts",
    name: "Preferred hosts",
    scope: PropertyScope::Template,
    required: false,
    default_value: None,
    description: "A comma separated subset of host group expressions that should be \
                  preferred for new instances of this template (best effort)",
    sensitive: false,
};

/// Every property, provider scope first.
pub const CONFIG_PROPERTIES: &[ConfigProperty] = &[HOSTS, PREFERRED_HOSTS];

/// Look up a property by its configuration key.
pub fn find_property(key: &str) -> Option<&'static ConfigProperty> {
    CONFIG_PROPERTIES.iter().find(|p| p.key == key)
}

/// Read an optional value, treating blank strings as absent.
pub(crate) fn optional_value<'a>(
    values: &'a HashMap<String, String>,
    property: &ConfigProperty,
) -> Option<&'a str> {
    values
        .get(property.key)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
        .or(property.default_value)
}

/// Provider-level configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// The pool expression.
    pub hosts: String,
}

impl ProviderConfig {
    /// Create a configuration from a pool expression.
    pub fn new(hosts: impl Into<String>) -> Self {
        Self {
            hosts: hosts.into(),
        }
    }

    /// Read the configuration from raw key/value pairs.
    pub fn from_values(values: &HashMap<String, String>) -> Result<Self, PoolError> {
        let hosts = optional_value(values, &HOSTS)
            .ok_or(PoolError::MissingConfig { key: HOSTS.key })?;

        Ok(Self::new(hosts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_property_table() {
        assert_eq!(CONFIG_PROPERTIES.len(), 2);
        assert!(find_property("hosts").unwrap().required);
        assert!(!find_property("preferredHosts").unwrap().required);
        assert!(find_property("username").is_none());
        assert!(CONFIG_PROPERTIES.iter().all(|p| !p.sensitive));
    }

    #[test]
    fn test_provider_config_from_values() {
        let config = ProviderConfig::from_values(&values(&[("hosts", "10.0.1.[5-15]")])).unwrap();
        assert_eq!(config.hosts, "10.0.1.[5-15]");
    }

    #[test]
    fn test_provider_config_missing_hosts() {
        let err = ProviderConfig::from_values(&values(&[])).unwrap_err();
        assert_eq!(err, PoolError::MissingConfig { key: "hosts" });

        let err = ProviderConfig::from_values(&values(&[("hosts", "   ")])).unwrap_err();
        assert_eq!(err, PoolError::MissingConfig { key: "hosts" });
    }
}
