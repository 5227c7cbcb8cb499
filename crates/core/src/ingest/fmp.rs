use crate::config::Settings;
use crate::domain::stock::StockData;
use crate::ingest::error::StockDataError;
use crate::ingest::provider::StockDataProvider;
use crate::ingest::types::{Endpoint, EndpointResult, MetricKind, RecordSet};
use crate::ingest::validate::validate_records;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub struct FmpClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for FmpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FmpClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl FmpClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.require_fmp_api_key()?.to_string();

        let base_url = settings
            .fmp_base_url
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = std::env::var("FMP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build FMP http client")?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    pub fn endpoints(&self, ticker: &str) -> Result<Vec<Endpoint>> {
        let ticker = ticker.trim();
        anyhow::ensure!(!ticker.is_empty(), "ticker must be non-empty");

        let base = self.base_url.trim_end_matches('/');
        let endpoints = MetricKind::ALL
            .into_iter()
            .map(|kind| {
                let segment = kind.path_segment();
                let url = if kind.annual_period() {
                    format!("{base}/{segment}/{ticker}?period=annual&apikey={}", self.api_key)
                } else {
                    format!("{base}/{segment}/{ticker}?apikey={}", self.api_key)
                };
                Endpoint { kind, url }
            })
            .collect();

        Ok(endpoints)
    }

    // Issues every request concurrently over the shared client. Output order
    // matches input order, and each result carries its kind, so downstream
    // assembly never matches by position.
    pub async fn fetch_all(&self, endpoints: &[Endpoint]) -> Vec<EndpointResult> {
        let fetches = endpoints.iter().map(|endpoint| async move {
            let payload = match self.fetch_endpoint(endpoint).await {
                Ok(value) => Some(value),
                Err(err) => {
                    tracing::warn!(
                        kind = endpoint.kind.canonical_name(),
                        error = %err,
                        "FMP endpoint fetch failed; continuing with remaining endpoints"
                    );
                    None
                }
            };
            EndpointResult {
                kind: endpoint.kind,
                payload,
            }
        });

        futures::future::join_all(fetches).await
    }

    // One attempt per endpoint. The overall fetch treats any failure here as
    // a missing section rather than retrying or aborting the siblings.
    async fn fetch_endpoint(&self, endpoint: &Endpoint) -> Result<Value> {
        let res = self
            .http
            .get(&endpoint.url)
            .send()
            .await
            .context("FMP request failed")?;

        let status = res.status();
        let text = res.text().await.context("failed to read FMP response")?;
        if !status.is_success() {
            anyhow::bail!("FMP HTTP {status}: {text}");
        }

        let value = serde_json::from_str::<Value>(&text)
            .with_context(|| format!("FMP response is not valid JSON: {text}"))?;

        // FMP reports bad keys and exhausted plans as 200 with an error object.
        if let Some(message) = provider_error_message(&value) {
            anyhow::bail!("FMP error payload: {message}");
        }

        Ok(value)
    }
}

#[async_trait::async_trait]
impl StockDataProvider for FmpClient {
    fn provider_name(&self) -> &'static str {
        "financial_modeling_prep"
    }

    async fn fetch_stock_data(&self, ticker: &str) -> Result<StockData> {
        let endpoints = self.endpoints(ticker)?;
        let results = self.fetch_all(&endpoints).await;
        let records = RecordSet::from_results(results)?;

        if records.is_empty() {
            return Err(StockDataError::NoData {
                ticker: ticker.trim().to_string(),
            }
            .into());
        }

        let data = validate_records(&records)?;

        tracing::info!(
            ticker = ticker.trim(),
            profile = data.profile.len(),
            quote = data.quote.len(),
            ratings = data.ratings.len(),
            key_metrics_ttm = data.key_metrics_ttm.len(),
            key_metrics = data.key_metrics.len(),
            growth = data.growth.len(),
            "validated stock data"
        );

        Ok(data)
    }
}

fn provider_error_message(value: &Value) -> Option<String> {
    let message = value.as_object()?.get("Error Message")?;
    match message.as_str() {
        Some(s) => Some(s.to_string()),
        None => Some(message.to_string()),
    }
}
