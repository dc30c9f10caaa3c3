//! Tests for the read-through cache's fail-open behavior
//!
//! These run against an unreachable backend on purpose: a cache outage must
//! never surface as a request failure, so every operation here succeeds by
//! falling through to the computation.

use dojo_admin::cache::Cache;
use dojo_common::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// Nothing listens on port 1
const DEAD_BACKEND: &str = "redis://127.0.0.1:1/";

#[tokio::test]
async fn unreachable_backend_disables_the_cache() {
    let cache = Cache::connect(DEAD_BACKEND).await;
    assert!(!cache.is_enabled());
}

#[tokio::test]
async fn get_or_compute_fails_open() {
    let cache = Cache::connect(DEAD_BACKEND).await;

    let value: i64 = cache
        .get_or_compute("dashboard:admin", 60, || async { Ok(42) })
        .await
        .expect("fail-open read must succeed");

    assert_eq!(value, 42);
}

#[tokio::test]
async fn every_read_recomputes_while_the_backend_is_down() {
    let cache = Cache::connect(DEAD_BACKEND).await;
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..3 {
        let calls = calls.clone();
        let value: i64 = cache
            .get_or_compute("k", 60, || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(7)
            })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    // No storage, so no hit: the computation ran each time
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn compute_errors_still_propagate() {
    let cache = Cache::connect(DEAD_BACKEND).await;

    let result: Result<i64, _> = cache
        .get_or_compute("k", 60, || async {
            Err(Error::Internal("aggregate query failed".to_string()))
        })
        .await;

    assert!(matches!(result, Err(Error::Internal(_))));
}

#[tokio::test]
async fn invalidation_is_absorbed() {
    let cache = Cache::connect(DEAD_BACKEND).await;

    // Must not panic or block; the failure is logged and swallowed
    cache.invalidate("dashboard:*").await;
}

#[tokio::test]
async fn serializable_structs_round_trip_through_the_compute_path() {
    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Counts {
        total: i64,
    }

    let cache = Cache::connect(DEAD_BACKEND).await;

    let value = cache
        .get_or_compute("counts", 60, || async { Ok(Counts { total: 9 }) })
        .await
        .unwrap();

    assert_eq!(value, Counts { total: 9 });
}
