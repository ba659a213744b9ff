//! REST store tests against a live development server.
//!
//! Binds the dev router on an ephemeral port and drives it through
//! `RestStore` and `CacheAccessor`, exercising the same wire protocol a
//! hosted store speaks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use matchday_cache::api::create_router;
use matchday_cache::cache::keys;
use matchday_cache::{
    AppState, CacheAccessor, CacheCategory, Config, KvStore, MemoryStore, RestStore, StoreError,
    StoreProvider,
};
use serde::{Deserialize, Serialize};

const TOKEN: &str = "dev-token";

async fn spawn_server() -> (String, MemoryStore) {
    let store = MemoryStore::new();
    let app = create_router(AppState::new(store.clone()).with_auth_token(TOKEN));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), store)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Standing {
    team: String,
    points: u32,
}

#[tokio::test]
async fn test_rest_store_commands() {
    let (url, _) = spawn_server().await;
    let store = RestStore::new(&url, TOKEN).unwrap();

    assert_eq!(store.get("fixtures:today").await.unwrap(), None);

    store.setex("fixtures:today", 300, "[1,2]").await.unwrap();
    store.setex("fixtures:tomorrow", 300, "[]").await.unwrap();
    store.setex("team:7", 3600, "{}").await.unwrap();

    assert_eq!(
        store.get("fixtures:today").await.unwrap().as_deref(),
        Some("[1,2]")
    );
    assert_eq!(
        store.keys("fixtures:*").await.unwrap(),
        vec!["fixtures:today".to_string(), "fixtures:tomorrow".to_string()]
    );

    let removed = store
        .del(&["fixtures:today".to_string(), "fixtures:tomorrow".to_string()])
        .await
        .unwrap();
    assert_eq!(removed, 2);
    assert_eq!(store.keys("*").await.unwrap(), vec!["team:7".to_string()]);
}

#[tokio::test]
async fn test_rest_store_keys_treat_glob_syntax_literally() {
    let (url, served) = spawn_server().await;
    let store = RestStore::new(&url, TOKEN).unwrap();
    for key in ["tags:[home]", "tags:h", "tags:o", "search:?q=derby", "search:xq=derby"] {
        served.set(key, "{}", Some(60)).await.unwrap();
    }

    assert_eq!(store.keys("tags:[home]").await.unwrap(), vec!["tags:[home]".to_string()]);
    assert_eq!(
        store.keys("search:?q=*").await.unwrap(),
        vec!["search:?q=derby".to_string()]
    );

    let cache = CacheAccessor::new(StoreProvider::rest(url, TOKEN));
    cache.invalidate_cache("tags:[home]").await;

    let left = served.keys("tags:*").await.unwrap();
    assert_eq!(left, vec!["tags:h".to_string(), "tags:o".to_string()]);
}

#[tokio::test]
async fn test_rest_store_sets_ttl_on_server() {
    let (url, served) = spawn_server().await;
    let store = RestStore::new(&url, TOKEN).unwrap();

    store.setex("live:1", 30, "\"1-0\"").await.unwrap();

    let ttl = served.ttl("live:1").await;
    assert!(ttl > 0 && ttl <= 30, "unexpected ttl {ttl}");
}

#[tokio::test]
async fn test_rest_store_wrong_token_is_unauthorized() {
    let (url, _) = spawn_server().await;
    let store = RestStore::new(&url, "wrong").unwrap();

    let result = store.get("anything").await;
    assert!(matches!(result, Err(StoreError::Unauthorized)));
}

#[tokio::test]
async fn test_rest_store_surfaces_server_errors() {
    let (url, _) = spawn_server().await;
    let store = RestStore::new(&url, TOKEN).unwrap();

    match store.setex("k", 0, "v").await {
        Err(StoreError::Server(message)) => assert!(message.contains("expire")),
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_accessor_over_rest_store() {
    let (url, served) = spawn_server().await;
    let cache = CacheAccessor::new(StoreProvider::rest(url, TOKEN));
    let calls = Arc::new(AtomicUsize::new(0));
    let key = keys::standings("premier-league", "2026");

    let fetch = || {
        let calls = Arc::clone(&calls);
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, StoreError>(vec![Standing {
                team: "Rovers".to_string(),
                points: 42,
            }])
        }
    };

    let first = cache
        .get_category(CacheCategory::Standings, &key, fetch)
        .await
        .unwrap();
    let second = cache
        .get_category(CacheCategory::Standings, &key, fetch)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(served.ttl(&key).await > 1700);

    let stats = cache.cache_stats().await.unwrap();
    assert!(stats.enabled);
    assert_eq!(stats.total_keys, 1);
    assert_eq!(stats.count_for("standings"), 1);

    cache.invalidate_standings_caches().await;
    assert!(served.is_empty().await);

    cache
        .get_category(CacheCategory::Standings, &key, fetch)
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_accessor_with_wrong_token_fails_open() {
    let (url, served) = spawn_server().await;
    let cache = CacheAccessor::new(StoreProvider::rest(url, "wrong"));

    let value: Result<u32, StoreError> = cache.get_cached("match:42", || async { Ok(7) }, None).await;

    assert_eq!(value.unwrap(), 7);
    assert!(served.is_empty().await);
    assert!(cache.cache_stats().await.is_none());
}

#[test]
fn test_provider_without_config_is_disabled() {
    let provider = StoreProvider::from_config(&Config::default());
    assert!(!provider.is_enabled());
    assert!(provider.handle().is_none());
}
