use super::ui;
use crate::core::config::LiveConfig;
use crate::core::{RateProvider, live};

pub async fn run(provider: &dyn RateProvider, config: &LiveConfig) -> anyhow::Result<()> {
    let rates = live::current_rates(provider, &config.base, &config.currencies).await;
    if rates.ok {
        let title = format!("Exchange rates for 1 {}", config.base);
        println!("{}\n\n{}", ui::style_text(&title, ui::StyleType::Title), rates.text);
    } else {
        println!("{}", ui::style_text(&rates.text, ui::StyleType::Error));
    }
    Ok(())
}
