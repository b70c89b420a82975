//! Multi-currency historical rate series.
//!
//! Every (currency, day) cell is an independent provider call. A failed call
//! or a currency missing from the response leaves that single cell empty; the
//! rest of the series is still filled in. Cells are tagged with their indices
//! so concurrent completion order never affects the assembled series.

use super::currency::{CurrencyCode, RateProvider};
use super::error::RateError;
use chrono::{NaiveDate, TimeDelta, Utc};
use futures::future::join_all;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Longest window a single request may ask for.
pub const MAX_WINDOW_DAYS: usize = 3660;

/// A single observation; `None` when the rate could not be obtained.
pub type RatePoint = Option<f64>;

/// Per-currency series kept in the caller's target order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrencySeries {
    entries: Vec<(CurrencyCode, Vec<RatePoint>)>,
}

impl CurrencySeries {
    pub fn get(&self, code: &CurrencyCode) -> Option<&[RatePoint]> {
        self.entries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, points)| points.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, &[RatePoint])> {
        self.entries.iter().map(|(c, points)| (c, points.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CurrencySeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, points) in &self.entries {
            map.serialize_entry(code.as_str(), points)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryResult {
    pub success: bool,
    pub base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<Vec<NaiveDate>>,
    #[serde(rename = "data", skip_serializing_if = "Option::is_none")]
    pub series: Option<CurrencySeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HistoryResult {
    fn invalid(input: &str, err: RateError) -> Self {
        HistoryResult {
            success: false,
            base: input.trim().to_string(),
            dates: None,
            series: None,
            message: Some(err.to_string()),
        }
    }
}

/// Which provider operation backs each day of the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// Query the rates published for each calendar day.
    #[default]
    Dated,
    /// Query the latest rates once per day slot.
    Latest,
}

pub struct HistoryBuilder<'a> {
    provider: &'a dyn RateProvider,
    mode: HistoryMode,
    max_concurrency: usize,
    today: NaiveDate,
}

impl<'a> HistoryBuilder<'a> {
    pub fn new(provider: &'a dyn RateProvider) -> Self {
        HistoryBuilder {
            provider,
            mode: HistoryMode::default(),
            max_concurrency: 1,
            today: Utc::now().date_naive(),
        }
    }

    pub fn mode(mut self, mode: HistoryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = limit.max(1);
        self
    }

    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Builds `window_size` points per target, oldest day first.
    ///
    /// `base` of `None` models a request that carried no base at all.
    /// `progress` is called once per finished attempt.
    pub async fn build(
        &self,
        base: Option<&str>,
        window_size: usize,
        targets: &[CurrencyCode],
        progress: &(dyn Fn() + Send + Sync),
    ) -> HistoryResult {
        let input = base.unwrap_or_default();
        let base = match CurrencyCode::parse(input) {
            Ok(code) => code,
            Err(e) => {
                warn!(input = %input, "Rejecting history request");
                return HistoryResult::invalid(input, e);
            }
        };

        let mut unique_targets: Vec<&CurrencyCode> = Vec::with_capacity(targets.len());
        for target in targets {
            if !unique_targets.contains(&target) {
                unique_targets.push(target);
            }
        }

        if window_size > MAX_WINDOW_DAYS {
            warn!(days = window_size, "Rejecting oversized history window");
            let reason = format!("at most {MAX_WINDOW_DAYS} days are supported");
            return HistoryResult::invalid(
                base.as_str(),
                RateError::invalid_window(window_size, reason),
            );
        }

        let dates = match self.mode {
            HistoryMode::Dated => match self.window_dates(window_size) {
                Some(dates) => Some(dates),
                None => {
                    warn!(days = window_size, today = %self.today, "Window leaves the calendar");
                    let reason = "the range falls outside the supported calendar";
                    return HistoryResult::invalid(
                        base.as_str(),
                        RateError::invalid_window(window_size, reason),
                    );
                }
            },
            HistoryMode::Latest => None,
        };

        if self.mode == HistoryMode::Latest {
            warn!("History mode is 'latest': every day slot repeats the latest rates");
        }
        info!(
            base = %base,
            days = window_size,
            targets = unique_targets.len(),
            "Building rate history"
        );

        let semaphore = Semaphore::new(self.max_concurrency);
        let attempts = unique_targets
            .iter()
            .enumerate()
            .flat_map(|(ci, currency)| (0..window_size).map(move |day| (ci, *currency, day)))
            .map(|(ci, currency, day)| {
                let semaphore = &semaphore;
                let base = &base;
                let date = dates.as_ref().map_or(self.today, |d| d[day]);
                async move {
                    let point = match semaphore.acquire().await {
                        Ok(_permit) => self.attempt(base, currency, date).await,
                        Err(_) => None,
                    };
                    progress();
                    (ci, day, point)
                }
            });

        let mut grid: Vec<Vec<RatePoint>> = vec![vec![None; window_size]; unique_targets.len()];
        for (ci, day, point) in join_all(attempts).await {
            grid[ci][day] = point;
        }

        let missing = grid.iter().flatten().filter(|p| p.is_none()).count();
        if missing > 0 {
            warn!(missing, "Rate history has gaps");
        }

        let entries = unique_targets.into_iter().cloned().zip(grid).collect();

        HistoryResult {
            success: true,
            base: base.to_string(),
            dates,
            series: Some(CurrencySeries { entries }),
            message: None,
        }
    }

    /// Calendar days of the window, oldest first; `None` if any day is unrepresentable.
    fn window_dates(&self, window_size: usize) -> Option<Vec<NaiveDate>> {
        (0..window_size)
            .map(|i| {
                let back = i64::try_from(window_size - 1 - i).ok()?;
                self.today.checked_sub_signed(TimeDelta::try_days(back)?)
            })
            .collect()
    }

    async fn attempt(
        &self,
        base: &CurrencyCode,
        currency: &CurrencyCode,
        date: NaiveDate,
    ) -> RatePoint {
        let fetched = match self.mode {
            HistoryMode::Dated => self.provider.on_date(base, date).await,
            HistoryMode::Latest => self.provider.latest(base).await,
        };
        match fetched {
            Ok(rates) => {
                let point = rates.get(currency);
                if point.is_none() {
                    debug!(currency = %currency, %date, "Currency missing from provider response");
                }
                point
            }
            Err(e) => {
                debug!(currency = %currency, %date, error = %e, "Rate attempt failed");
                None
            }
        }
    }
}
