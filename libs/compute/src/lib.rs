//! # byon-compute
//!
//! Compute instance allocation from a static pool of hosts ("bring your own
//! nodes").
//!
//! A [`HostPool`] is built from a host group expression (see
//! [`byon_hostgroups`]) and binds hosts to caller-chosen instance
//! identifiers. It keeps no history and no persistent state: an identifier
//! is either running (it holds a host) or deleted, and a host bound once is
//! never handed out again by the same pool.
//!
//! ## Example
//!
//! ```
//! use byon_compute::{HostPool, InstanceStatus};
//!
//! let pool = HostPool::new("10.0.1.[5-15]").unwrap();
//! let ids = vec!["ID-1".to_string(), "ID-2".to_string()];
//!
//! let allocated = pool.allocate(Some("10.0.1.10"), &ids, 1).unwrap();
//! assert_eq!(allocated[0].host, "10.0.1.10");
//! assert_eq!(allocated[1].host, "10.0.1.5");
//!
//! pool.delete(&ids);
//! assert_eq!(pool.get_state(&ids)["ID-1"], InstanceStatus::Deleted);
//! assert_eq!(pool.available_count(), 9);
//! ```

mod address;
mod error;
mod instance;
mod pool;
pub mod properties;
mod template;

pub use address::HostAddress;
pub use error::PoolError;
pub use instance::{AllocatedInstance, InstanceStatus};
pub use pool::HostPool;
pub use properties::{ConfigProperty, ProviderConfig};
pub use template::InstanceTemplate;
