use super::ui;
use crate::core::config::HistoryConfig;
use crate::core::{HistoryBuilder, HistoryResult, RateProvider};
use anyhow::Result;
use comfy_table::Cell;

impl HistoryResult {
    pub fn display_as_table(&self) -> String {
        let Some(series) = self.series.as_ref().filter(|_| self.success) else {
            let message = self.message.as_deref().unwrap_or("History request failed");
            return ui::style_text(message, ui::StyleType::Error);
        };

        let days = series.iter().map(|(_, points)| points.len()).max().unwrap_or(0);
        let mut header = vec![ui::header_cell("Currency")];
        match &self.dates {
            Some(dates) => header.extend(
                dates
                    .iter()
                    .map(|d| ui::header_cell(&d.format("%m-%d").to_string())),
            ),
            None => header.extend((1..=days).map(|i| ui::header_cell(&format!("Day {i}")))),
        }

        let mut table = ui::new_styled_table();
        table.set_header(header);
        for (code, points) in series.iter() {
            let mut row = vec![Cell::new(code.as_str())];
            row.extend(
                points
                    .iter()
                    .map(|p| ui::format_optional_cell(*p, |r| format!("{r:.4}"))),
            );
            table.add_row(row);
        }

        format!(
            "Rate history for 1 {}\n\n{}",
            ui::style_text(&self.base, ui::StyleType::Title),
            table
        )
    }
}

pub async fn run(
    provider: &dyn RateProvider,
    config: &HistoryConfig,
    base: Option<&str>,
    days: Option<usize>,
    json: bool,
) -> Result<()> {
    let window_size = days.unwrap_or(config.window_size);

    let attempts = window_size.saturating_mul(config.targets.len());
    let pb = ui::new_progress_bar(u64::try_from(attempts).unwrap_or(u64::MAX), true);
    pb.set_message("Fetching rates...");

    let result = HistoryBuilder::new(provider)
        .mode(config.mode)
        .max_concurrency(config.max_concurrency)
        .build(base, window_size, &config.targets, &|| pb.inc(1))
        .await;
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.display_as_table());
    }
    Ok(())
}
