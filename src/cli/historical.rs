use super::ui;
use crate::core::{HistoricalPeriod, HistoricalPoint, HistoricalRateProvider, RateChange};
use anyhow::Result;
use comfy_table::Cell;

pub fn display_series(from: &str, to: &str, points: &[HistoricalPoint]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell(&format!("{from}/{to}")),
    ]);

    for point in points {
        table.add_row(vec![
            Cell::new(point.date.format("%b %-d").to_string()),
            ui::number_cell(format!("{:.4}", point.rate)),
        ]);
    }

    table.to_string()
}

pub fn display_summary(change: &RateChange) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Current Rate"),
        ui::header_cell("Change"),
        ui::header_cell("Change %"),
    ]);
    table.add_row(vec![
        ui::number_cell(format!("{:.4}", change.current)),
        ui::change_cell(ui::signed(change.change, 4), change.change),
        ui::change_cell(
            format!("{}%", ui::signed(change.percentage, 2)),
            change.percentage,
        ),
    ]);
    table.to_string()
}

pub async fn run(
    from: &str,
    to: &str,
    period: HistoricalPeriod,
    provider: &dyn HistoricalRateProvider,
) -> Result<()> {
    println!(
        "{}\n",
        ui::style_text(
            &format!("Historical Exchange Rates: {from} → {to} ({period})"),
            ui::StyleType::Title
        )
    );

    let points = match provider.fetch_history(from, to, period).await {
        Ok(points) => points,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load historical data");
            println!(
                "{}",
                ui::style_text(
                    "Failed to fetch historical data. Please try again later.",
                    ui::StyleType::Error
                )
            );
            return Ok(());
        }
    };

    println!("{}\n", display_summary(&RateChange::from_series(&points)));
    println!("{}", display_series(from, to, &points));
    println!(
        "\n{}",
        ui::style_text(
            "Historical data is simulated for demonstration.",
            ui::StyleType::Subtle
        )
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_display_series_and_summary() {
        let points = vec![
            HistoricalPoint {
                date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
                rate: 80.0,
            },
            HistoricalPoint {
                date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                rate: 84.0,
            },
        ];

        let series = display_series("USD", "INR", &points);
        assert!(series.contains("USD/INR"));
        assert!(series.contains("Mar 9"));
        assert!(series.contains("84.0000"));

        let summary = display_summary(&RateChange::from_series(&points));
        assert!(summary.contains("+4.0000"));
        assert!(summary.contains("+5.00%"));
    }
}
