use super::ui;
use crate::core::snapshot::{RateSnapshotRow, load_snapshot};
use std::path::Path;
use tracing::debug;

fn display_as_table(rows: &[RateSnapshotRow]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Currency"), ui::header_cell("Rate")]);
    for row in rows {
        table.add_row(vec![
            comfy_table::Cell::new(&row.currency),
            ui::rate_cell(&row.rate),
        ]);
    }
    table.to_string()
}

pub fn run(path: &Path) -> anyhow::Result<()> {
    match load_snapshot(path) {
        Ok(rows) if rows.is_empty() => {
            println!("{}", ui::style_text("Snapshot has no rates", ui::StyleType::Subtle));
        }
        Ok(rows) => {
            println!(
                "{}\n\n{}",
                ui::style_text("Rate snapshot", ui::StyleType::Title),
                display_as_table(&rows)
            );
        }
        Err(e) => {
            debug!(error = %e, "Snapshot not loaded");
            println!("{}", ui::style_text("No snapshot available", ui::StyleType::Subtle));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_keeps_row_order() {
        let rows = vec![
            RateSnapshotRow {
                currency: "USD".to_string(),
                rate: "150.25".to_string(),
            },
            RateSnapshotRow {
                currency: "EUR".to_string(),
                rate: "160.10".to_string(),
            },
        ];
        let table = display_as_table(&rows);
        let usd = table.find("USD").unwrap();
        let eur = table.find("EUR").unwrap();
        assert!(usd < eur);
        assert!(table.contains("160.10"));
    }
}
