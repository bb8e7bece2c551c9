use super::ui;
use crate::core::{RateProvider, RateTable, SessionState, catalog, format_rate};
use anyhow::Result;
use comfy_table::Cell;
use tracing::warn;

/// Shown when the favorites list is empty.
const FALLBACK_CODES: [&str; 4] = ["EUR", "GBP", "JPY", "INR"];

/// Fetches the table for `base`, returning `None` (after logging) on failure.
pub async fn fetch_with_spinner(provider: &dyn RateProvider, base: &str) -> Option<RateTable> {
    let pb = ui::new_spinner(&format!("Fetching {base} rates..."));
    let result = provider.fetch_rates(base).await;
    pb.finish_and_clear();

    match result {
        Ok(table) => Some(table),
        Err(e) => {
            warn!(error = %e, "Failed to fetch rates");
            println!(
                "{}",
                ui::style_text(
                    &format!("Failed to fetch exchange rates. Please try again later. ({e})"),
                    ui::StyleType::Error
                )
            );
            None
        }
    }
}

/// Renders `codes` with their rate against the table's base.
pub fn display_rates_table<'a>(
    base: &str,
    codes: impl IntoIterator<Item = &'a str>,
    table: Option<&RateTable>,
) -> String {
    let mut out = ui::new_styled_table();
    out.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Name"),
        ui::header_cell(&format!("Rate (1 {base})")),
    ]);

    for code in codes {
        let rate = table.and_then(|t| t.get(code));
        out.add_row(vec![
            Cell::new(code),
            Cell::new(catalog::currency_name(code)),
            match rate {
                Some(r) => ui::number_cell(format_rate(r)),
                None => ui::na_cell(table.is_none()),
            },
        ]);
    }

    out.to_string()
}

pub async fn run(
    base: &str,
    all: bool,
    provider: &dyn RateProvider,
    state: &SessionState,
) -> Result<()> {
    let table = fetch_with_spinner(provider, base).await;

    let codes: Vec<&str> = if all {
        catalog::codes().filter(|c| *c != base).collect()
    } else if state.favorites().is_empty() {
        FALLBACK_CODES.to_vec()
    } else {
        state.favorites().codes().iter().map(String::as_str).collect()
    };

    println!(
        "{}\n",
        ui::style_text(&format!("Exchange rates for {base}"), ui::StyleType::Title)
    );
    println!("{}", display_rates_table(base, codes, table.as_ref()));

    if let Some(date) = table.as_ref().and_then(|t| t.date()) {
        println!(
            "\n{}",
            ui::style_text(&format!("Last updated: {date}"), ui::StyleType::Subtle)
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rates_table_formats_rates() {
        let table = RateTable::new(
            "USD",
            None,
            vec![("INR".to_string(), 83.2512), ("KWD".to_string(), 0.3071)],
        );
        let output = display_rates_table("USD", ["INR", "KWD", "BTC"], Some(&table));

        assert!(output.contains("83.25"));
        assert!(output.contains("0.3071"));
        assert!(output.contains("Indian Rupee"));
        assert!(output.contains("N/A"));
    }
}
