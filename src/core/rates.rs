//! Exchange rate abstractions

use super::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rates for every known currency, relative to one base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    base: String,
    date: Option<String>,
    rates: BTreeMap<String, f64>,
}

impl RateTable {
    /// Builds a table, dropping entries that are not positive finite numbers.
    pub fn new<I>(base: &str, date: Option<String>, rates: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let rates = rates
            .into_iter()
            .filter(|(_, rate)| rate.is_finite() && *rate > 0.0)
            .collect();
        Self {
            base: base.to_string(),
            date,
            rates,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, base: &str) -> Result<RateTable>;
}
