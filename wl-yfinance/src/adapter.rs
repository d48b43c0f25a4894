use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;
use url::Url;
use wl_core::WlError;

use crate::PROVIDER;

const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";
const DEFAULT_COOKIE_URL: &str = "https://fc.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// quoteSummary abstraction (so we can inject fakes in tests).
#[async_trait]
pub trait YfQuoteSummary: Send + Sync {
    /// Fetch the raw quoteSummary result object for `symbol` restricted to `modules`.
    ///
    /// The returned value holds one member per module (`price`, `assetProfile`, ...).
    async fn quote_summary(&self, symbol: &str, modules: &[&str]) -> Result<Value, WlError>;
}

impl dyn YfQuoteSummary {
    /// Build a `YfQuoteSummary` from a closure.
    pub fn from_fn<F>(f: F) -> Arc<dyn YfQuoteSummary>
    where
        F: Send + Sync + 'static + Fn(&str, &[&str]) -> Result<Value, WlError>,
    {
        struct FnSummary<F>(F);

        #[async_trait]
        impl<F> YfQuoteSummary for FnSummary<F>
        where
            F: Send + Sync + 'static + Fn(&str, &[&str]) -> Result<Value, WlError>,
        {
            async fn quote_summary(
                &self,
                symbol: &str,
                modules: &[&str],
            ) -> Result<Value, WlError> {
                (self.0)(symbol, modules)
            }
        }

        Arc::new(FnSummary(f))
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: Summary,
}

#[derive(Debug, Deserialize)]
struct Summary {
    result: Option<Vec<Value>>,
    error: Option<SummaryError>,
}

#[derive(Debug, Deserialize)]
struct SummaryError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

/// Production adapter talking to the Yahoo Finance HTTP API.
///
/// quoteSummary requires a session cookie plus a matching crumb. The crumb is obtained
/// lazily, cached, and refreshed once when the API answers 401/403.
pub struct RealAdapter {
    http: reqwest::Client,
    base_url: Url,
    cookie_url: Url,
    crumb: Mutex<Option<String>>,
}

fn upstream(msg: impl Into<String>) -> WlError {
    WlError::upstream(PROVIDER, msg)
}

fn parse_url(raw: &str) -> Result<Url, WlError> {
    Url::parse(raw).map_err(|e| WlError::InvalidArg(format!("invalid url {raw}: {e}")))
}

impl RealAdapter {
    /// Adapter against the public Yahoo Finance endpoints.
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn new_default() -> Result<Self, WlError> {
        Self::with_endpoints(DEFAULT_BASE_URL, DEFAULT_COOKIE_URL)
    }

    /// Adapter against custom endpoints, e.g. a local mock server.
    ///
    /// # Errors
    /// Fails on malformed URLs or if the HTTP client cannot be built.
    pub fn with_endpoints(base_url: &str, cookie_url: &str) -> Result<Self, WlError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| upstream(format!("http client: {e}")))?;
        Ok(Self {
            http,
            base_url: parse_url(base_url)?,
            cookie_url: parse_url(cookie_url)?,
            crumb: Mutex::new(None),
        })
    }

    async fn crumb(&self) -> Result<String, WlError> {
        let mut guard = self.crumb.lock().await;
        if let Some(c) = guard.as_ref() {
            return Ok(c.clone());
        }

        // Priming only sets the session cookie; its status is irrelevant.
        if let Err(_e) = self.http.get(self.cookie_url.clone()).send().await {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %_e, "cookie priming request failed");
        }

        let url = self
            .base_url
            .join("/v1/test/getcrumb")
            .map_err(|e| upstream(format!("crumb url: {e}")))?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| upstream(format!("crumb request: {e}")))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| upstream(format!("crumb body: {e}")))?;
        let crumb = body.trim();
        if !status.is_success() || crumb.is_empty() || crumb.starts_with('<') {
            return Err(upstream(format!("crumb unavailable (status {status})")));
        }

        *guard = Some(crumb.to_string());
        Ok(crumb.to_string())
    }

    async fn clear_crumb(&self) {
        *self.crumb.lock().await = None;
    }

    fn summary_url(&self, symbol: &str, modules: &[&str], crumb: &str) -> Result<Url, WlError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| WlError::InvalidArg(format!("base url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v10", "finance", "quoteSummary", symbol]);
        url.query_pairs_mut()
            .append_pair("modules", &modules.join(","))
            .append_pair("crumb", crumb);
        Ok(url)
    }
}

fn map_summary_error(symbol: &str, err: &SummaryError) -> WlError {
    let text = format!("{} {}", err.code, err.description).to_lowercase();
    if text.contains("not found") {
        WlError::not_found(format!("quoteSummary for {symbol}"))
    } else {
        upstream(format!("{}: {}", err.code, err.description))
    }
}

#[async_trait]
impl YfQuoteSummary for RealAdapter {
    async fn quote_summary(&self, symbol: &str, modules: &[&str]) -> Result<Value, WlError> {
        let mut refreshed = false;
        loop {
            let crumb = self.crumb().await?;
            let url = self.summary_url(symbol, modules, &crumb)?;
            let resp = self
                .http
                .get(url)
                .send()
                .await
                .map_err(|e| upstream(format!("quoteSummary request: {e}")))?;
            let status = resp.status();

            if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
                self.clear_crumb().await;
                if refreshed {
                    return Err(upstream(format!("unauthorized (status {status})")));
                }
                #[cfg(feature = "tracing")]
                tracing::debug!(symbol, %status, "crumb rejected; refreshing");
                refreshed = true;
                continue;
            }

            let body = resp
                .text()
                .await
                .map_err(|e| upstream(format!("quoteSummary body: {e}")))?;
            let envelope: Option<Envelope> = serde_json::from_str(&body).ok();

            if let Some(err) = envelope.as_ref().and_then(|e| e.quote_summary.error.as_ref()) {
                return Err(map_summary_error(symbol, err));
            }
            if !status.is_success() {
                return Err(upstream(format!("status {status}")));
            }
            let envelope =
                envelope.ok_or_else(|| WlError::Data("malformed quoteSummary response".into()))?;
            // An empty result list is how upstream answers a symbol it has no quote for.
            return envelope
                .quote_summary
                .result
                .and_then(|r| r.into_iter().next())
                .ok_or_else(|| WlError::no_price_data(symbol));
        }
    }
}
