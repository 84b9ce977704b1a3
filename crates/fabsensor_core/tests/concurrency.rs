//! Concurrent updates against a shared store.

use fabsensor_core::{Config, InMemoryStore, RecordService};
use fabsensor_testkit::{init_tracing, seeded_store};
use std::sync::Arc;
use std::thread;

const ROUNDS: usize = 200;

#[test]
fn concurrent_owner_and_status_updates_do_not_lose_writes() {
    init_tracing();
    let (store, _) = seeded_store();
    let store = Arc::new(store);
    let service = Arc::new(RecordService::new(
        Config::new().max_update_attempts(u32::MAX),
    ));

    let owners = {
        let store = Arc::clone(&store);
        let service = Arc::clone(&service);
        thread::spawn(move || {
            for i in 0..ROUNDS {
                service
                    .set_owner(store.as_ref(), "SENSOR0", &format!("owner{i}"))
                    .unwrap();
            }
        })
    };

    let statuses = {
        let store = Arc::clone(&store);
        let service = Arc::clone(&service);
        thread::spawn(move || {
            for i in 0..ROUNDS {
                service
                    .set_status(store.as_ref(), "SENSOR0", &format!("t{i}"), &format!("h{i}"))
                    .unwrap();
            }
        })
    };

    owners.join().unwrap();
    statuses.join().unwrap();

    let record = service.get(store.as_ref(), "SENSOR0").unwrap();
    assert_eq!(record.owner, format!("owner{}", ROUNDS - 1));
    assert_eq!(record.time, format!("t{}", ROUNDS - 1));
    assert_eq!(record.hash, format!("h{}", ROUNDS - 1));
    assert_eq!(record.from, "CNC");
    assert_eq!(record.address, "swdbucket");
}

#[test]
fn concurrent_updates_on_distinct_keys() {
    let store = Arc::new(InMemoryStore::new());
    let service = Arc::new(RecordService::default());
    service.seed(store.as_ref()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let store = Arc::clone(&store);
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let key = format!("SENSOR{worker}");
                for i in 0..50 {
                    service
                        .set_owner(store.as_ref(), &key, &format!("w{worker}-{i}"))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    for worker in 0..4 {
        let record = service
            .get(store.as_ref(), &format!("SENSOR{worker}"))
            .unwrap();
        assert_eq!(record.owner, format!("w{worker}-49"));
    }
    assert_eq!(store.open_scans(), 0);
}

#[test]
fn scans_run_alongside_writers() {
    let store = Arc::new(InMemoryStore::new());
    let service = Arc::new(RecordService::default());
    service.seed(store.as_ref()).unwrap();

    let writer = {
        let store = Arc::clone(&store);
        let service = Arc::clone(&service);
        thread::spawn(move || {
            for i in 0..100 {
                service
                    .create(store.as_ref(), &format!("EXTRA{i:03}"), "u", "f", "t", "h", "a")
                    .unwrap();
            }
        })
    };

    for _ in 0..20 {
        let entries = service.list_all(store.as_ref()).unwrap();
        assert!(entries.len() >= 10);
        let mut keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        let before = keys.len();
        keys.dedup();
        assert_eq!(keys.len(), before);
    }

    writer.join().unwrap();
    assert_eq!(service.list_all(store.as_ref()).unwrap().len(), 110);
    assert_eq!(store.open_scans(), 0);
}
