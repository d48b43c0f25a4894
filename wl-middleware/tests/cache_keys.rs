use std::sync::Arc;
use std::time::Duration;

use wl_core::{CacheConfig, Need, QuoteService};
use wl_middleware::CachingService;
use wl_mock::MockService;

#[tokio::test]
async fn different_needs_never_share_an_entry() {
    let mock = Arc::new(MockService::new());
    let svc = CachingService::new(mock.clone(), &CacheConfig::new(Duration::from_secs(60), 16));

    let (_, narrow) = svc.get("AAPL", Need::PRICE).await.unwrap();
    let (_, wide) = svc.get("AAPL", Need::PRICE | Need::ASSET_PROFILE).await.unwrap();
    assert_eq!(mock.calls(), 2);
    assert!(narrow.section("assetProfile").is_none());
    assert!(wide.section("assetProfile").is_some());

    // each need keeps its own entry
    let (_, narrow_again) = svc.get("AAPL", Need::PRICE).await.unwrap();
    assert_eq!(narrow_again, narrow);
    assert_eq!(mock.calls(), 2);
    assert_eq!(svc.len().await, 2);
}

#[tokio::test]
async fn different_symbols_are_separate_entries() {
    let mock = Arc::new(MockService::new());
    let svc = CachingService::new(mock.clone(), &CacheConfig::new(Duration::from_secs(60), 16));

    let (a, _) = svc.get("AAPL", Need::PRICE).await.unwrap();
    let (m, _) = svc.get("MSFT", Need::PRICE).await.unwrap();
    assert_ne!(a.price, m.price);
    assert_eq!(mock.calls(), 2);
}
