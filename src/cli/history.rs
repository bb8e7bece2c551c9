use super::ui;
use crate::core::{ConversionRecord, SessionState};
use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::Cell;

const MINUTES_IN_DAY: i64 = 1_440;
const MINUTES_IN_MONTH: i64 = 43_200;

/// Human readable distance between `then` and `now`, e.g. "5 minutes ago".
///
/// Uses the same buckets as date-fns `formatDistance`; months and years are
/// counted as 30 and 360 days.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 0 {
        return "just now".to_string();
    }

    let minutes = rounded_div(seconds, 60);
    let distance = match minutes {
        0 => "less than a minute".to_string(),
        1..=44 => count(minutes, "minute"),
        45..=89 => "about 1 hour".to_string(),
        90..=1_439 => format!("about {}", count(rounded_div(minutes, 60), "hour")),
        1_440..=2_519 => "1 day".to_string(),
        2_520..=43_199 => count(rounded_div(minutes, MINUTES_IN_DAY), "day"),
        43_200..=86_399 => format!(
            "about {}",
            count(rounded_div(minutes, MINUTES_IN_MONTH), "month")
        ),
        _ if minutes / MINUTES_IN_MONTH < 12 => {
            count(rounded_div(minutes, MINUTES_IN_MONTH), "month")
        }
        _ => {
            let months = minutes / MINUTES_IN_MONTH;
            let years = months / 12;
            match months % 12 {
                0..=2 => format!("about {}", count(years, "year")),
                3..=8 => format!("over {}", count(years, "year")),
                _ => format!("almost {}", count(years + 1, "year")),
            }
        }
    };

    format!("{distance} ago")
}

fn rounded_div(value: i64, by: i64) -> i64 {
    (value as f64 / by as f64).round() as i64
}

fn count(value: i64, unit: &str) -> String {
    let plural = if value == 1 { "" } else { "s" };
    format!("{value} {unit}{plural}")
}

pub fn display_history(records: &[ConversionRecord], now: DateTime<Utc>) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Conversion"),
        ui::header_cell("Rate"),
        ui::header_cell("When"),
    ]);

    for record in records {
        table.add_row(vec![
            Cell::new(format!(
                "{} {} → {:.2} {}",
                record.amount(),
                record.from_currency(),
                record.result(),
                record.to_currency()
            )),
            ui::number_cell(format!("{:.4}", record.rate())),
            Cell::new(time_ago(record.timestamp(), now)),
        ]);
    }

    table.to_string()
}

pub fn run(limit: usize, state: &SessionState) -> Result<()> {
    println!(
        "{}\n",
        ui::style_text("Recent Conversions", ui::StyleType::Title)
    );

    let records = state.history().recent(limit);
    if records.is_empty() {
        println!(
            "{}",
            ui::style_text("No recent conversions yet", ui::StyleType::Subtle)
        );
        return Ok(());
    }

    println!("{}", display_history(records, Utc::now()));
    Ok(())
}
