//! Allocated instances and their observable status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::HostAddress;

/// An instance identifier bound to a host from the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatedInstance {
    /// Caller-chosen instance identifier.
    pub id: String,

    /// Host string as it appeared in the pool.
    pub host: String,

    /// Address the host resolved to when it was bound.
    pub address: HostAddress,
}

/// Instance status as seen by the pool.
///
/// The pool keeps no history, so an identifier that was never allocated
/// reports the same status as one that was deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceStatus {
    /// The identifier currently holds a host.
    Running,

    /// The identifier holds no host.
    Deleted,
}

impl InstanceStatus {
    /// Returns true if the instance holds a host.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceStatus::Running => write!(f, "RUNNING"),
            InstanceStatus::Deleted => write!(f, "DELETED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_matches_serde() {
        for status in [InstanceStatus::Running, InstanceStatus::Deleted] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
    }

    #[test]
    fn test_allocated_instance_json() {
        let instance = AllocatedInstance {
            id: "ID-1".to_string(),
            host: "10.0.1.5".to_string(),
            address: HostAddress::Ip("10.0.1.5".parse().unwrap()),
        };

        let json = serde_json::to_value(&instance).unwrap();
        assert_eq!(json["id"], "ID-1");
        assert_eq!(json["address"]["kind"], "ip");
        assert_eq!(json["address"]["value"], "10.0.1.5");
    }
}
