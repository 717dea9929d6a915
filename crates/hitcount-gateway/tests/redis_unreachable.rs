//! A Redis target that is down or hung must fail fast, not hang.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::time::{Duration, Instant};

use hitcount_gateway::config::StoreSection;
use hitcount_gateway::store::{CounterStore, RedisStore};

async fn closed_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

/// Accepts connections and never writes a byte back.
async fn silent_port() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((sock, _)) = listener.accept().await {
            held.push(sock);
        }
    });
    port
}

fn store_at(port: u16, timeout_ms: u64) -> RedisStore {
    let cfg = StoreSection {
        host: "127.0.0.1".into(),
        port,
        timeout_ms,
        ..StoreSection::default()
    };
    RedisStore::new(&cfg).unwrap()
}

#[tokio::test]
async fn incr_against_closed_port_is_store_unavailable() {
    let store = store_at(closed_port().await, 500);

    let started = Instant::now();
    let err = store.incr("hits").await.expect_err("nothing is listening");
    assert!(err.is_store_unavailable(), "{err}");
    assert!(started.elapsed() < Duration::from_millis(500) + Duration::from_secs(1));

    // The failed connection is not cached; the next call tries again.
    assert!(store.ping().await.is_err());
}

#[tokio::test]
async fn silent_store_times_out() {
    let store = store_at(silent_port().await, 300);

    let started = Instant::now();
    let err = store.incr("hits").await.expect_err("server never replies");
    let elapsed = started.elapsed();

    assert!(err.is_store_unavailable(), "{err}");
    assert!(err.to_string().contains("timed out"), "{err}");
    // connect and the command are each bounded by one timeout
    assert!(elapsed >= Duration::from_millis(300), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(900), "{elapsed:?}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls_against_hung_store_fail_independently() {
    let store = std::sync::Arc::new(store_at(silent_port().await, 300));

    let started = Instant::now();
    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                let t = Instant::now();
                let res = store.incr("hits").await;
                (res, t.elapsed())
            })
        })
        .collect();

    for t in tasks {
        let (res, elapsed) = t.await.unwrap();
        assert!(res.is_err_and(|e| e.is_store_unavailable()));
        assert!(elapsed < Duration::from_millis(900), "{elapsed:?}");
    }
    assert!(started.elapsed() < Duration::from_millis(1200));
}
