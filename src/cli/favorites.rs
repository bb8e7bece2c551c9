use super::{rates, ui};
use crate::core::{RateProvider, SessionState};
use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesCommand {
    List,
    Add(String),
    Remove(String),
}

pub async fn run(
    command: FavoritesCommand,
    base: &str,
    provider: &dyn RateProvider,
    state: &mut SessionState,
) -> Result<()> {
    match command {
        FavoritesCommand::List => list(base, provider, state).await,
        FavoritesCommand::Add(code) => {
            if state.favorites().contains(&code) {
                println!("{code} is already a favorite");
            } else {
                state.favorites_mut().add(&code);
                println!("Added {} to favorites", ui::style_text(&code, ui::StyleType::Label));
            }
            Ok(())
        }
        FavoritesCommand::Remove(code) => {
            if state.favorites().contains(&code) {
                state.favorites_mut().remove(&code);
                println!(
                    "Removed {} from favorites",
                    ui::style_text(&code, ui::StyleType::Label)
                );
            } else {
                println!("{code} is not a favorite");
            }
            Ok(())
        }
    }
}

async fn list(base: &str, provider: &dyn RateProvider, state: &SessionState) -> Result<()> {
    println!(
        "{}\n",
        ui::style_text("Favorite Currencies", ui::StyleType::Title)
    );

    if state.favorites().is_empty() {
        println!(
            "{}",
            ui::style_text(
                "No favorite currencies yet. Add some currencies to track their rates!",
                ui::StyleType::Subtle
            )
        );
        return Ok(());
    }

    let table = rates::fetch_with_spinner(provider, base).await;
    let codes = state.favorites().codes().iter().map(String::as_str);
    println!(
        "{}",
        rates::display_rates_table(base, codes, table.as_ref())
    );
    Ok(())
}
