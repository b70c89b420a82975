use super::currency::{CurrencyCode, RateProvider};
use tracing::{debug, warn};

/// Formatted live rates ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveRates {
    pub text: String,
    pub ok: bool,
}

/// Fetches the latest rates for `base` and keeps `currencies` in the given order.
///
/// Currencies the provider did not return are left out rather than flagged.
pub async fn current_rates(
    provider: &dyn RateProvider,
    base: &CurrencyCode,
    currencies: &[CurrencyCode],
) -> LiveRates {
    match provider.latest(base).await {
        Ok(rates) => {
            let lines: Vec<String> = currencies
                .iter()
                .filter_map(|code| rates.get(code).map(|rate| format!("{code}: {rate:.4}")))
                .collect();
            debug!(shown = lines.len(), requested = currencies.len(), "Live rates ready");
            LiveRates {
                text: lines.join("\n"),
                ok: true,
            }
        }
        Err(e) => {
            warn!(error = %e, "Live rate fetch failed");
            LiveRates {
                text: format!("Could not load exchange rates: {e}"),
                ok: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RateError, RateMapping};
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct FixedProvider(Result<RateMapping, RateError>);

    #[async_trait]
    impl RateProvider for FixedProvider {
        async fn latest(&self, _base: &CurrencyCode) -> Result<RateMapping, RateError> {
            self.0.clone()
        }

        async fn on_date(
            &self,
            base: &CurrencyCode,
            _date: NaiveDate,
        ) -> Result<RateMapping, RateError> {
            self.latest(base).await
        }
    }

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_rates_follow_display_order() {
        let rates: RateMapping = [(code("EUR"), 0.00612345), (code("USD"), 0.0067)]
            .into_iter()
            .collect();
        let provider = FixedProvider(Ok(rates));
        let display = [code("USD"), code("GBP"), code("EUR")];
        let live = current_rates(&provider, &code("JPY"), &display).await;

        assert!(live.ok);
        assert_eq!(live.text, "USD: 0.0067\nEUR: 0.0061");
    }

    #[tokio::test]
    async fn test_failure_embeds_cause() {
        let provider = FixedProvider(Err(RateError::fetch_failed("JPY", "HTTP error: 503")));
        let live = current_rates(&provider, &code("JPY"), &[code("USD")]).await;

        assert!(!live.ok);
        assert!(live.text.contains("HTTP error: 503"), "{}", live.text);
    }
}
