use std::sync::Arc;

use wl::QuoteService;

#[must_use]
pub fn get_service() -> Arc<dyn QuoteService> {
    if std::env::var("WL_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Service for CI) ---");
        return Arc::new(wl_mock::MockService::new());
    }
    match wl_yfinance::YfService::new_default() {
        Ok(svc) => Arc::new(svc),
        Err(e) => {
            println!("--- (Yahoo client unavailable: {e}; using Mock Service) ---");
            Arc::new(wl_mock::MockService::new())
        }
    }
}
