use super::ui;
use crate::core::{ConversionSession, RateProvider, SessionState, SessionStatus, parse_amount};
use anyhow::Result;
use std::sync::Arc;

pub async fn run(
    amount: &str,
    from: &str,
    to: &str,
    provider: Arc<dyn RateProvider>,
    state: &mut SessionState,
) -> Result<()> {
    let amount = parse_amount(amount);
    let mut session = ConversionSession::new(provider, amount, from, to);

    let pb = ui::new_spinner("Converting...");
    let record = session.refresh(state).await;
    pb.finish_and_clear();

    match (record, session.status()) {
        (Some(record), _) => {
            println!(
                "{} {} = {} {}",
                record.amount(),
                record.from_currency(),
                ui::style_text(&format!("{:.2}", record.result()), ui::StyleType::Result),
                record.to_currency()
            );
            println!(
                "{}",
                ui::style_text(
                    &format!("1 {} = {:.4} {}", from, record.rate(), to),
                    ui::StyleType::Subtle
                )
            );
        }
        (None, SessionStatus::Failed(reason)) => {
            println!(
                "{}",
                ui::style_text(
                    &format!("Exchange rate unavailable, try again later ({reason})"),
                    ui::StyleType::Error
                )
            );
        }
        (None, _) => {
            println!(
                "{}",
                ui::style_text(
                    &format!("No exchange rate from {from} to {to}"),
                    ui::StyleType::Error
                )
            );
        }
    }

    Ok(())
}
