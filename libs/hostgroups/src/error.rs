//! Error types for host group expression parsing.

use thiserror::Error;

/// Errors that can occur when expanding a host group expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostGroupError {
    /// Brackets are unbalanced or the group holds more than one range.
    #[error(
        "malformed host group '{group}': a group can contain a single range \
         enclosed within [ ] or {{ }} or none"
    )]
    MalformedRange { group: String },

    /// The range is inverted, empty, out of bounds, or not recognized.
    #[error("invalid range in host group '{group}': {reason}")]
    InvalidRange { group: String, reason: String },
}

impl HostGroupError {
    pub(crate) fn invalid_range(group: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            group: group.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true if the group had unbalanced brackets or several ranges.
    pub fn is_malformed(&self) -> bool {
        matches!(self, HostGroupError::MalformedRange { .. })
    }

    /// Returns true if the group carried a range that could not be expanded.
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, HostGroupError::InvalidRange { .. })
    }

    /// The offending group expression.
    pub fn group(&self) -> &str {
        match self {
            HostGroupError::MalformedRange { group } => group,
            HostGroupError::InvalidRange { group, .. } => group,
        }
    }
}
