//! Currency codes, rate mappings and the provider abstraction

use super::error::RateError;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

/// An uppercase, trimmed currency identifier such as `USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Normalizes `input` (trim + uppercase). Empty or non-alphanumeric input is rejected.
    pub fn parse(input: &str) -> Result<Self, RateError> {
        let code = input.trim().to_uppercase();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(RateError::InvalidBase {
                input: input.to_string(),
            });
        }
        Ok(CurrencyCode(code))
    }

    /// For literals already in canonical form.
    pub(crate) fn from_static(code: &'static str) -> Self {
        CurrencyCode(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = RateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CurrencyCode::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> String {
        code.0
    }
}

/// Rates for one implicit base currency, keyed by target code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateMapping {
    rates: HashMap<CurrencyCode, f64>,
}

impl RateMapping {
    pub fn get(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(CurrencyCode, f64)> for RateMapping {
    fn from_iter<I: IntoIterator<Item = (CurrencyCode, f64)>>(iter: I) -> Self {
        RateMapping {
            rates: iter.into_iter().collect(),
        }
    }
}

/// One remote source of exchange rates.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Latest rates relative to `base`.
    async fn latest(&self, base: &CurrencyCode) -> Result<RateMapping, RateError>;

    /// Rates relative to `base` as published for `date`.
    async fn on_date(&self, base: &CurrencyCode, date: NaiveDate)
    -> Result<RateMapping, RateError>;
}
