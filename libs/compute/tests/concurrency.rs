//! Concurrent access to a shared pool.
//!
//! Every operation holds the pool lock for its whole duration, so parallel
//! callers must never observe a host bound to two identifiers.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use byon_compute::{HostPool, InstanceStatus, InstanceTemplate};
use rstest::rstest;

fn ids(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}-{i}")).collect()
}

#[rstest]
#[case(4, 25)]
#[case(8, 12)]
#[case(16, 7)]
fn test_parallel_allocations_never_share_a_host(#[case] workers: usize, #[case] per_worker: usize) {
    let pool = Arc::new(HostPool::new("node-{000..099}.example.com").unwrap());

    let handles: Vec<_> = (0..workers)
        .map(|w| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                let instance_ids = ids(&format!("w{w}"), per_worker);
                pool.allocate(Some("node-{050..059}.example.com"), &instance_ids, 0)
                    .unwrap()
            })
        })
        .collect();

    let batches: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let allocated: Vec<_> = batches.into_iter().flatten().collect();
    let expected = (workers * per_worker).min(100);
    assert_eq!(allocated.len(), expected);

    let hosts: HashSet<_> = allocated.iter().map(|i| i.host.as_str()).collect();
    assert_eq!(hosts.len(), allocated.len(), "a host was bound twice");

    // The ten preferred hosts always go first
    for n in 50..60 {
        assert!(hosts.contains(format!("node-{n:03}.example.com").as_str()));
    }

    assert_eq!(pool.available_count(), 100 - expected);
    assert_eq!(pool.allocation_count(), expected);
}

#[test]
fn test_parallel_allocate_and_delete() {
    let pool = HostPool::new("10.0.{0..1}.0, 10.1.0.[1-200]").unwrap();
    let template = InstanceTemplate::new("batch", None).unwrap();

    thread::scope(|s| {
        for w in 0..8 {
            let pool = &pool;
            let template = &template;
            s.spawn(move || {
                for round in 0..5 {
                    let instance_ids = ids(&format!("w{w}-r{round}"), 5);
                    let allocated = pool.allocate_template(template, &instance_ids, 1).unwrap();
                    assert_eq!(allocated.len(), 5);

                    let states = pool.get_state(&instance_ids);
                    assert!(states.values().all(InstanceStatus::is_running));

                    pool.delete(&instance_ids);
                    assert!(pool.find(&instance_ids).is_empty());
                }
            });
        }
    });

    // 8 workers x 5 rounds x 5 hosts, none returned
    assert_eq!(pool.allocation_count(), 0);
    assert_eq!(pool.available_count(), 2);
}

#[test]
fn test_capacity_error_under_contention() {
    let pool = HostPool::new("h[1-10].lan").unwrap();

    let outcomes: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|w| {
                let pool = &pool;
                s.spawn(move || pool.allocate(None, &ids(&format!("w{w}"), 4), 4))
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let succeeded = outcomes.iter().filter(|r| r.is_ok()).count();
    let rejected = outcomes
        .iter()
        .filter(|r| matches!(r, Err(e) if e.is_capacity()))
        .count();

    // Ten hosts fit two full batches; the third leaves two, below the minimum
    assert_eq!(succeeded, 2);
    assert_eq!(rejected, 2);
    assert_eq!(pool.available_count(), 2);
}
