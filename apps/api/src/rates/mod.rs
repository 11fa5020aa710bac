//! Exchange-rate sources. The engine takes the KRW→USD rate as an explicit input;
//! these are the places the service gets it from.
//!
//! Nothing here caches. Each recommendation request asks its source once.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::AppError;

#[async_trait]
pub trait RateSource: Send + Sync {
    /// USD per 1 KRW.
    async fn usd_per_krw(&self) -> Result<f64, AppError>;

    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// FixedRateSource
// ────────────────────────────────────────────────────────────────────────────

/// A constant rate from configuration.
pub struct FixedRateSource {
    rate: f64,
}

impl FixedRateSource {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

#[async_trait]
impl RateSource for FixedRateSource {
    async fn usd_per_krw(&self) -> Result<f64, AppError> {
        Ok(self.rate)
    }

    fn backend(&self) -> &'static str {
        "fixed"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HttpRateSource
// ────────────────────────────────────────────────────────────────────────────

/// Response body of a KRW-based rates endpoint, e.g. `{"base":"KRW","rates":{"USD":0.00072}}`.
#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: RatesTable,
}

#[derive(Debug, Deserialize)]
struct RatesTable {
    #[serde(rename = "USD")]
    usd: Option<f64>,
}

pub struct HttpRateSource {
    client: Client,
    url: String,
}

impl HttpRateSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for exchange rates")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn usd_per_krw(&self) -> Result<f64, AppError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            warn!("Exchange rate request failed: {e}");
            AppError::RateSource(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Exchange rate endpoint returned {status}: {body}");
            return Err(AppError::RateSource(format!(
                "rate endpoint returned status {}",
                status.as_u16()
            )));
        }

        let parsed: RatesResponse = response
            .json()
            .await
            .map_err(|e| AppError::RateSource(format!("unreadable rate payload: {e}")))?;

        let rate = parsed
            .rates
            .usd
            .ok_or_else(|| AppError::RateSource("rate payload has no USD entry".to_string()))?;

        debug!("Fetched exchange rate: 1 KRW = {rate} USD");
        Ok(rate)
    }

    fn backend(&self) -> &'static str {
        "http"
    }
}
