use crate::core::{CurrencyCode, RateError, RateMapping, RateProvider};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Rates from an ExchangeRate-API compatible endpoint.
pub struct ExchangeRateProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateProvider {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        ExchangeRateProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    async fn fetch(&self, base: &CurrencyCode, url: &str) -> Result<RateMapping, RateError> {
        debug!("Requesting exchange rates from {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            RateError::fetch_failed(base.as_str(), format!("request error: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(RateError::fetch_failed(
                base.as_str(),
                format!("HTTP error: {}", response.status()),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| RateError::fetch_failed(base.as_str(), format!("body error: {e}")))?;

        parse_rates(base, &text)
    }
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    rates: Option<HashMap<String, f64>>,
}

fn parse_rates(base: &CurrencyCode, body: &str) -> Result<RateMapping, RateError> {
    let data: RatesResponse = serde_json::from_str(body).map_err(|e| {
        RateError::fetch_failed(base.as_str(), format!("failed to parse response: {e}"))
    })?;

    if data.result.as_deref() == Some("error") {
        let kind = data.error_type.as_deref().unwrap_or("unknown");
        return Err(RateError::fetch_failed(
            base.as_str(),
            format!("provider error: {kind}"),
        ));
    }

    let rates = data
        .rates
        .ok_or_else(|| RateError::fetch_failed(base.as_str(), "response has no rates"))?;

    Ok(rates
        .into_iter()
        .filter_map(|(key, rate)| match CurrencyCode::parse(&key) {
            Ok(code) => Some((code, rate)),
            Err(_) => {
                debug!(key = %key, "Ignoring malformed currency key");
                None
            }
        })
        .collect())
}

#[async_trait]
impl RateProvider for ExchangeRateProvider {
    #[instrument(name = "LatestRatesFetch", skip_all, fields(base = %base))]
    async fn latest(&self, base: &CurrencyCode) -> Result<RateMapping, RateError> {
        let url = format!("{}/latest/{}", self.base_url, base);
        self.fetch(base, &url).await
    }

    #[instrument(name = "DatedRatesFetch", skip_all, fields(base = %base, date = %date))]
    async fn on_date(
        &self,
        base: &CurrencyCode,
        date: NaiveDate,
    ) -> Result<RateMapping, RateError> {
        let url = format!(
            "{}/history/{}/{}/{}/{}",
            self.base_url,
            base,
            date.year(),
            date.month(),
            date.day()
        );
        self.fetch(base, &url).await
    }
}
