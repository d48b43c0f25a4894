use std::time::Duration;

use serde_json::json;
use wl_core::path::extract;
use wl_core::{Need, QuoteService, WlError};
use wl_mock::MockService;

#[tokio::test]
async fn fixtures_decode_quotes() {
    let mock = MockService::new();
    let (q, f) = mock.get("AAPL", Need::PRICE | Need::CHG_PCT).await.unwrap();
    assert_eq!(q.price, "189.84");
    assert_eq!(q.change_pct, "1.23%");
    assert_eq!(q.name, "Apple Inc.");
    assert_eq!(f.sections().collect::<Vec<_>>(), ["price"]);
    assert!(f.ceo.is_none());

    let (q, _) = mock.get("MSFT", Need::PRICE).await.unwrap();
    assert_eq!(q.price, "411.22");
    assert_eq!(q.change_pct, "-0.50%");
    assert_eq!(q.name, "Microsoft Corporation");
}

#[tokio::test]
async fn payload_is_scoped_to_need() {
    let mock = MockService::new();
    let (_, f) = mock.get("AAPL", Need::SUMMARY_DETAIL).await.unwrap();
    assert_eq!(extract(f.raw(), "summaryDetail.marketCap.fmt").as_deref(), Some("2.95T"));
    assert!(f.section("assetProfile").is_none());
    assert!(f.ceo.is_none());

    let (_, f) = mock.get("AAPL", Need::ASSET_PROFILE).await.unwrap();
    assert_eq!(extract(f.raw(), "assetProfile.sector").as_deref(), Some("Technology"));
    assert!(f.section("summaryDetail").is_none());
    assert_eq!(f.ceo.unwrap().name, "Mr. Timothy D. Cook");
}

#[tokio::test]
async fn special_symbols_fail() {
    let mock = MockService::new();
    assert!(matches!(
        mock.get("FAIL", Need::PRICE).await,
        Err(WlError::Upstream { .. })
    ));
    assert_eq!(
        mock.get("NOPRICE", Need::PRICE).await.unwrap_err(),
        WlError::no_price_data("NOPRICE")
    );
    assert!(matches!(
        mock.get("ZZZZ", Need::PRICE).await,
        Err(WlError::NotFound { .. })
    ));
}

#[tokio::test]
async fn empty_symbol_is_not_an_upstream_call() {
    let mock = MockService::new();
    let (q, f) = mock.get("", Need::all()).await.unwrap();
    assert_eq!(q, Default::default());
    assert!(f.is_empty());
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn overrides_and_request_log() {
    let mock = MockService::new()
        .with_payload("NEW", json!({"price": {"regularMarketPrice": {"raw": 1.5}}}))
        .with_failure("AAPL", WlError::upstream("mock", "down"));
    assert_eq!(mock.get("NEW", Need::PRICE).await.unwrap().0.price, "1.50");
    assert!(mock.get("AAPL", Need::PRICE).await.is_err());
    assert_eq!(
        mock.requests(),
        vec![("NEW".to_string(), Need::PRICE), ("AAPL".to_string(), Need::PRICE)]
    );
}

#[tokio::test(start_paused = true)]
async fn latency_runs_on_the_tokio_clock() {
    let mock = MockService::new().with_latency("MSFT", Duration::from_secs(30));
    let started = tokio::time::Instant::now();
    mock.get("MSFT", Need::PRICE).await.unwrap();
    assert!(started.elapsed() >= Duration::from_secs(30));
    assert_eq!(mock.peak_in_flight(), 1);
}
