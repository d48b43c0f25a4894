#![allow(dead_code)]

use std::sync::Arc;

use wl::{Item, QuoteService, Watchlist, Wl, WlBuilder};
use wl_mock::MockService;

// ---------- Lightweight fixtures and helpers for tests ----------

/// Common symbol constants used across tests.
pub const AAPL: &str = "AAPL";
pub const MSFT: &str = "MSFT";
pub const TOYOTA: &str = "7203.T";
pub const FAIL: &str = "FAIL";
pub const NOPRICE: &str = "NOPRICE";

/// Watchlist of bare symbols.
pub fn list(name: &str, symbols: &[&str]) -> Watchlist {
    Watchlist {
        name: name.to_string(),
        columns: vec![],
        items: symbols.iter().map(|s| Item::new(*s)).collect(),
    }
}

/// Builder over `mock`, keeping a handle for inspecting its request log.
pub fn builder_with(mock: MockService) -> (WlBuilder, Arc<MockService>) {
    let mock = Arc::new(mock);
    let svc: Arc<dyn QuoteService> = mock.clone();
    (Wl::builder().with_service(svc), mock)
}

/// Default renderer over the built-in fixtures.
pub fn wl_with_mock() -> (Wl, Arc<MockService>) {
    let (b, mock) = builder_with(MockService::new());
    (b.build().expect("valid builder"), mock)
}
