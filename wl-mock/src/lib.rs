//! Deterministic, fixture-backed `QuoteService` for tests and examples.
//!
//! Payloads are shaped like upstream quoteSummary results and run through the same
//! decoder as the real service, so resolver behavior matches production.
//!
//! Special symbols:
//! - `FAIL` always returns an `Upstream` error.
//! - `TIMEOUT` sleeps for 200 ms (on the Tokio clock) before answering `NotFound`.
//! - `NOPRICE` has a profile but no price block, yielding `NoPriceData`.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use wl_core::payload::decode;
use wl_core::{Enrichment, Need, QuoteService, WlError};

mod fixtures;

const NAME: &str = "wl-mock";

/// Mock service answering from static fixtures, recording every request.
pub struct MockService {
    payloads: HashMap<String, Value>,
    failures: HashMap<String, WlError>,
    latency: HashMap<String, Duration>,
    default_latency: Duration,
    requests: Mutex<Vec<(String, Need)>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockService {
    /// Mock with the built-in fixtures (`AAPL`, `MSFT`, `7203.T`, `NOPRICE`).
    #[must_use]
    pub fn new() -> Self {
        let payloads = fixtures::all()
            .into_iter()
            .map(|(s, v)| (s.to_string(), v))
            .collect();
        Self {
            payloads,
            failures: HashMap::new(),
            latency: HashMap::new(),
            default_latency: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Serve `payload` (a quoteSummary result object) for `symbol`.
    #[must_use]
    pub fn with_payload(mut self, symbol: impl Into<String>, payload: Value) -> Self {
        self.payloads.insert(symbol.into(), payload);
        self
    }

    /// Always fail `symbol` with `err`.
    #[must_use]
    pub fn with_failure(mut self, symbol: impl Into<String>, err: WlError) -> Self {
        self.failures.insert(symbol.into(), err);
        self
    }

    /// Delay answers for `symbol`.
    #[must_use]
    pub fn with_latency(mut self, symbol: impl Into<String>, delay: Duration) -> Self {
        self.latency.insert(symbol.into(), delay);
        self
    }

    /// Delay answers for every symbol without a specific latency.
    #[must_use]
    pub const fn with_default_latency(mut self, delay: Duration) -> Self {
        self.default_latency = delay;
        self
    }

    /// Number of upstream calls served so far (empty symbols excluded).
    pub fn calls(&self) -> usize {
        self.requests().len()
    }

    /// `(symbol, need)` of every call, in arrival order.
    pub fn requests(&self) -> Vec<(String, Need)> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Highest number of calls observed in flight at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn delay_for(&self, symbol: &str) -> Duration {
        if symbol == "TIMEOUT" {
            return Duration::from_millis(200);
        }
        self.latency
            .get(symbol)
            .copied()
            .unwrap_or(self.default_latency)
    }

    fn answer(&self, symbol: &str, need: Need) -> Result<Enrichment, WlError> {
        if symbol == "FAIL" {
            return Err(WlError::upstream(NAME, "forced failure"));
        }
        if let Some(err) = self.failures.get(symbol) {
            return Err(err.clone());
        }
        let payload = self
            .payloads
            .get(symbol)
            .ok_or_else(|| WlError::not_found(format!("quoteSummary for {symbol}")))?;
        decode(symbol, need, payload)
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl QuoteService for MockService {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn get(&self, symbol: &str, need: Need) -> Result<Enrichment, WlError> {
        if symbol.is_empty() {
            return Ok(Enrichment::default());
        }
        if let Ok(mut r) = self.requests.lock() {
            r.push((symbol.to_string(), need));
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        let delay = self.delay_for(symbol);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.answer(symbol, need)
    }
}
