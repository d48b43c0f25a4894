use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use wl_core::{Need, QuoteService, WlError};
use wl_yfinance::YfService;
use wl_yfinance::adapter::YfQuoteSummary;

fn payload() -> serde_json::Value {
    json!({
        "price": {
            "regularMarketPrice": {"raw": 123.456},
            "regularMarketChangePercent": {"raw": 2.0, "fmt": "2.00%"},
            "shortName": "Test Co"
        },
        "assetProfile": {
            "sector": "Industrials",
            "companyOfficers": [{"name": "Pat", "title": "President", "age": 60}]
        }
    })
}

#[tokio::test]
async fn get_requests_modules_implied_by_need() {
    let seen: Arc<Mutex<Vec<Vec<String>>>> = Arc::default();
    let log = seen.clone();
    let adapter = <dyn YfQuoteSummary>::from_fn(move |symbol, modules| {
        assert_eq!(symbol, "TEST");
        log.lock().unwrap().push(modules.iter().map(|m| (*m).to_string()).collect());
        Ok(payload())
    });
    let svc = YfService::from_adapter(adapter);

    let (q, f) = svc.get("TEST", Need::CHG_PCT | Need::ASSET_PROFILE).await.unwrap();
    assert_eq!(q.price, "123.46");
    assert_eq!(q.change_pct, "2.00%");
    assert_eq!(q.name, "Test Co");
    assert_eq!(
        f.section("assetProfile").and_then(|ap| ap.get("sector")),
        Some(&json!("Industrials"))
    );
    assert_eq!(f.ceo.unwrap().title, "President");

    svc.get("TEST", Need::empty()).await.unwrap();
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            vec!["price".to_string(), "assetProfile".to_string()],
            vec!["price".to_string()],
        ]
    );
}

#[tokio::test]
async fn empty_symbol_skips_the_adapter() {
    let adapter = <dyn YfQuoteSummary>::from_fn(|_, _| panic!("adapter must not be called"));
    let svc = YfService::from_adapter(adapter);
    let (q, f) = svc.get("", Need::all()).await.unwrap();
    assert!(q.price.is_empty());
    assert!(f.is_empty());
}

#[tokio::test]
async fn missing_price_block_is_no_price_data() {
    let adapter = <dyn YfQuoteSummary>::from_fn(|_, _| Ok(json!({"assetProfile": {}})));
    let svc = YfService::from_adapter(adapter);
    assert_eq!(
        svc.get("XYZ", Need::PRICE).await.unwrap_err(),
        WlError::no_price_data("XYZ")
    );
}

#[tokio::test]
async fn adapter_errors_propagate() {
    let adapter = <dyn YfQuoteSummary>::from_fn(|s, _| {
        Err(WlError::not_found(format!("quoteSummary for {s}")))
    });
    let svc = YfService::from_adapter(adapter);
    assert!(matches!(
        svc.get("NOPE", Need::PRICE).await,
        Err(WlError::NotFound { .. })
    ));
}

struct Slow;

#[async_trait::async_trait]
impl YfQuoteSummary for Slow {
    async fn quote_summary(
        &self,
        _symbol: &str,
        _modules: &[&str],
    ) -> Result<serde_json::Value, WlError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(payload())
    }
}

#[tokio::test(start_paused = true)]
async fn slow_upstream_hits_the_fixed_timeout() {
    let svc = YfService::from_adapter(Arc::new(Slow));
    let err = svc.get("SLOW", Need::PRICE).await.unwrap_err();
    assert_eq!(err, WlError::provider_timeout("wl-yfinance", "SLOW"));

    let svc = YfService::from_adapter(Arc::new(Slow)).with_timeout(Duration::from_secs(120));
    assert!(svc.get("SLOW", Need::PRICE).await.is_ok());
}
