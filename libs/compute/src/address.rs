//! Local address resolution for pool hosts.
//!
//! Resolution is a syntax check only: IP literals are parsed, anything else
//! must look like a DNS name. No lookup ever leaves the process.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::PoolError;

/// Maximum length of a DNS name, without the trailing dot.
const MAX_HOSTNAME_LEN: usize = 253;

/// Maximum length of a single DNS label.
const MAX_LABEL_LEN: usize = 63;

/// The address a host string resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HostAddress {
    /// IPv4 or IPv6 literal.
    Ip(IpAddr),

    /// Syntactically valid DNS name.
    Hostname(String),
}

impl HostAddress {
    /// Resolve a host string without touching the network.
    pub fn resolve(host: &str) -> Result<Self, PoolError> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(Self::Ip(ip));
        }

        if is_valid_hostname(host) {
            return Ok(Self::Hostname(host.to_string()));
        }

        Err(PoolError::InvalidHost {
            host: host.to_string(),
        })
    }

    /// Get the IP address, if the host was an IP literal.
    pub fn ip(&self) -> Option<IpAddr> {
        match self {
            HostAddress::Ip(ip) => Some(*ip),
            HostAddress::Hostname(_) => None,
        }
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostAddress::Ip(ip) => write!(f, "{}", ip),
            HostAddress::Hostname(name) => write!(f, "{}", name),
        }
    }
}

/// RFC 1123 host name check.
///
/// An all-numeric last label is rejected so malformed IPv4 literals such as
/// `10.0.1.256` do not pass as names.
fn is_valid_hostname(host: &str) -> bool {
    let name = host.strip_suffix('.').unwrap_or(host);
    if name.is_empty() || name.len() > MAX_HOSTNAME_LEN {
        return false;
    }

    let top_level_is_numeric = name
        .rsplit('.')
        .next()
        .is_some_and(|label| label.bytes().all(|b| b.is_ascii_digit()));

    !top_level_is_numeric && name.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}
