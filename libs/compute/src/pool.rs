//! The host pool.
//!
//! A pool is built once from a host group expression and hands out hosts to
//! caller-chosen instance identifiers:
//!
//! - Preferred hosts are bound first, in preference order, when still free
//! - Remaining identifiers take hosts from the front of the pool (FIFO)
//! - Deleting an identifier releases the binding but never the host; capacity
//!   only shrinks for the lifetime of the pool
//!
//! All operations run under one lock, so each is atomic with respect to the
//! others and no host is bound twice.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::{
    AllocatedInstance, HostAddress, InstanceStatus, InstanceTemplate, PoolError, ProviderConfig,
};

/// A host bound to an instance identifier.
#[derive(Debug, Clone)]
struct Allocation {
    host: String,
    address: HostAddress,
}

/// Mutable pool state, guarded as a unit.
#[derive(Debug, Default)]
struct PoolState {
    /// Hosts not bound to any identifier, in pool order.
    available: VecDeque<String>,

    /// Current bindings by instance identifier.
    allocations: HashMap<String, Allocation>,
}

impl PoolState {
    /// Remove the first occurrence of a host, returning whether it was free.
    fn take_host(&mut self, host: &str) -> bool {
        match self.available.iter().position(|h| h == host) {
            Some(idx) => {
                self.available.remove(idx);
                true
            }
            None => false,
        }
    }

    fn bind(&mut self, id: &str, host: String, address: HostAddress) -> AllocatedInstance {
        self.allocations.insert(
            id.to_string(),
            Allocation {
                host: host.clone(),
                address: address.clone(),
            },
        );

        AllocatedInstance {
            id: id.to_string(),
            host,
            address,
        }
    }
}

/// A fixed set of hosts and the identifiers currently holding them.
#[derive(Debug)]
pub struct HostPool {
    state: Mutex<PoolState>,
}

impl HostPool {
    /// Build a pool from a host group expression.
    pub fn new(expression: &str) -> Result<Self, PoolError> {
        let hosts = byon_hostgroups::expand(expression)?;
        if hosts.is_empty() {
            return Err(PoolError::EmptyPool {
                expression: expression.to_string(),
            });
        }

        info!(host_count = hosts.len(), "Host pool created");

        Ok(Self {
            state: Mutex::new(PoolState {
                available: hosts.into(),
                allocations: HashMap::new(),
            }),
        })
    }

    /// Build a pool from provider configuration.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, PoolError> {
        Self::new(&config.hosts)
    }

    // No operation panics while mutating, so a poisoned lock still guards
    // consistent state.
    fn state(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Allocate hosts, trying an optional preferred-hosts expression first.
    ///
    /// At most `min(available, instance_ids.len())` identifiers are bound,
    /// consumed in input order. Callers that need every identifier bound must
    /// check the length of the result.
    ///
    /// # Errors
    ///
    /// - [`PoolError::Expression`] if the preferred expression is invalid;
    ///   nothing is bound
    /// - [`PoolError::InsufficientCapacity`] if fewer than `min_count` hosts
    ///   are available; nothing is bound
    /// - [`PoolError::InvalidHost`] if a candidate host fails resolution;
    ///   bindings made earlier in the same call are kept
    pub fn allocate(
        &self,
        preferred_hosts: Option<&str>,
        instance_ids: &[String],
        min_count: usize,
    ) -> Result<Vec<AllocatedInstance>, PoolError> {
        let preferred = match preferred_hosts {
            Some(expression) => byon_hostgroups::expand(expression)?,
            None => Vec::new(),
        };

        self.allocate_preferring(&preferred, instance_ids, min_count)
    }

    /// Allocate hosts using the preferences of a template.
    pub fn allocate_template(
        &self,
        template: &InstanceTemplate,
        instance_ids: &[String],
        min_count: usize,
    ) -> Result<Vec<AllocatedInstance>, PoolError> {
        debug!(template = %template.name, "Allocating for template");
        self.allocate_preferring(template.preferred_hosts(), instance_ids, min_count)
    }

    fn allocate_preferring(
        &self,
        preferred: &[String],
        instance_ids: &[String],
        min_count: usize,
    ) -> Result<Vec<AllocatedInstance>, PoolError> {
        let mut state = self.state();

        let available = state.available.len();
        if available < min_count {
            warn!(requested = min_count, available, "Not enough capacity");
            return Err(PoolError::InsufficientCapacity {
                requested: min_count,
                available,
            });
        }

        let mut limit = available.min(instance_ids.len());
        let mut ids = instance_ids.iter();
        let mut result = Vec::with_capacity(limit);

        // Preferred hosts first, as many as are still free
        for host in preferred {
            if limit == 0 {
                break;
            }

            let address = HostAddress::resolve(host)?;
            if !state.take_host(host) {
                debug!(host = %host, "Preferred host not available");
                continue;
            }

            let Some(id) = ids.next() else { break };
            info!(host = %host, instance_id = %id, "New preferred allocation");
            result.push(state.bind(id, host.clone(), address));
            limit -= 1;
        }

        // Then the front of the pool
        while limit > 0 {
            let (Some(id), Some(host)) = (ids.next(), state.available.front()) else {
                break;
            };

            let address = HostAddress::resolve(host)?;
            let Some(host) = state.available.pop_front() else {
                break;
            };

            info!(host = %host, instance_id = %id, "New allocation");
            result.push(state.bind(id, host, address));
            limit -= 1;
        }

        Ok(result)
    }

    /// Look up the identifiers that currently hold a host.
    ///
    /// Unknown identifiers are omitted; results follow input order.
    pub fn find<I, S>(&self, instance_ids: I) -> Vec<AllocatedInstance>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let state = self.state();
        instance_ids
            .into_iter()
            .filter_map(|id| {
                let id = id.as_ref();
                state.allocations.get(id).map(|a| AllocatedInstance {
                    id: id.to_string(),
                    host: a.host.clone(),
                    address: a.address.clone(),
                })
            })
            .collect()
    }

    /// Report whether each identifier currently holds a host.
    pub fn get_state<I, S>(&self, instance_ids: I) -> HashMap<String, InstanceStatus>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let state = self.state();
        instance_ids
            .into_iter()
            .map(|id| {
                let id = id.as_ref();
                let status = if state.allocations.contains_key(id) {
                    InstanceStatus::Running
                } else {
                    InstanceStatus::Deleted
                };
                (id.to_string(), status)
            })
            .collect()
    }

    /// Release the bindings of the given identifiers.
    ///
    /// Released hosts do not return to the pool. Unknown identifiers are
    /// ignored, so deleting twice is harmless.
    pub fn delete<I, S>(&self, instance_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.state();
        for id in instance_ids {
            let id = id.as_ref();
            if let Some(allocation) = state.allocations.remove(id) {
                info!(host = %allocation.host, instance_id = %id, "Deleted allocation");
            }
        }
    }

    /// SSH host key fingerprints per identifier.
    ///
    /// The pool never learns host keys, so this is always empty.
    pub fn host_key_fingerprints<I, S>(&self, _instance_ids: I) -> HashMap<String, HashSet<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        HashMap::new()
    }

    /// Number of hosts not yet bound.
    pub fn available_count(&self) -> usize {
        self.state().available.len()
    }

    /// Snapshot of the unbound hosts, in pool order.
    pub fn available_hosts(&self) -> Vec<String> {
        self.state().available.iter().cloned().collect()
    }

    /// Number of identifiers currently holding a host.
    pub fn allocation_count(&self) -> usize {
        self.state().allocations.len()
    }
}
