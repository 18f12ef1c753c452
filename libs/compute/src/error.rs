//! Error types for pool construction and allocation.

use byon_hostgroups::HostGroupError;
use thiserror::Error;

/// Errors that can occur when building or using a host pool.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A pool or preferred-hosts expression could not be expanded.
    #[error(transparent)]
    Expression(#[from] HostGroupError),

    /// The pool expression expands to no hosts at all.
    #[error("host group expression expands to an empty list: '{expression}'")]
    EmptyPool { expression: String },

    /// Fewer hosts are available than the requested minimum.
    #[error("not enough capacity: requested at least {requested}, only have {available} available")]
    InsufficientCapacity { requested: usize, available: usize },

    /// A host is neither an IP address nor a valid DNS name.
    #[error("invalid host: '{host}'")]
    InvalidHost { host: String },

    /// A required configuration value is missing or blank.
    #[error("configuration property not found: {key}")]
    MissingConfig { key: &'static str },
}

impl PoolError {
    /// Returns true if an expression failed to expand.
    pub fn is_expression(&self) -> bool {
        matches!(self, PoolError::Expression(_))
    }

    /// Returns true if the pool expression produced no hosts.
    pub fn is_empty_pool(&self) -> bool {
        matches!(self, PoolError::EmptyPool { .. })
    }

    /// Returns true if the allocation was rejected for lack of hosts.
    pub fn is_capacity(&self) -> bool {
        matches!(self, PoolError::InsufficientCapacity { .. })
    }

    /// Returns true if a candidate host failed address resolution.
    pub fn is_invalid_host(&self) -> bool {
        matches!(self, PoolError::InvalidHost { .. })
    }
}
