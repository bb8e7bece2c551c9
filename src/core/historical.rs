//! Historical rate abstractions and the mock series generator

use super::convert::round_to;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum HistoricalPeriod {
    SevenDays,
    ThirtyDays,
    ThreeMonths,
    OneYear,
}

impl Display for HistoricalPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                HistoricalPeriod::SevenDays => "7D",
                HistoricalPeriod::ThirtyDays => "30D",
                HistoricalPeriod::ThreeMonths => "3M",
                HistoricalPeriod::OneYear => "1Y",
            }
        )
    }
}

impl HistoricalPeriod {
    pub fn days(&self) -> u32 {
        match self {
            HistoricalPeriod::SevenDays => 7,
            HistoricalPeriod::ThirtyDays => 30,
            HistoricalPeriod::ThreeMonths => 90,
            HistoricalPeriod::OneYear => 365,
        }
    }
}

impl FromStr for HistoricalPeriod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "7D" => Ok(HistoricalPeriod::SevenDays),
            "30D" => Ok(HistoricalPeriod::ThirtyDays),
            "3M" => Ok(HistoricalPeriod::ThreeMonths),
            "1Y" => Ok(HistoricalPeriod::OneYear),
            _ => Err(anyhow!("Invalid historical period: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub rate: f64,
}

#[async_trait]
pub trait HistoricalRateProvider: Send + Sync {
    /// Daily rates for the pair, oldest first, ending today.
    async fn fetch_history(
        &self,
        from: &str,
        to: &str,
        period: HistoricalPeriod,
    ) -> Result<Vec<HistoricalPoint>>;
}

/// Summary of how a series moved over its period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateChange {
    pub current: f64,
    pub change: f64,
    pub percentage: f64,
}

impl RateChange {
    pub fn from_series(points: &[HistoricalPoint]) -> Self {
        let current = points.last().map_or(0.0, |p| p.rate);
        match (points.first(), points.last()) {
            (Some(first), Some(last)) if points.len() >= 2 => {
                let change = last.rate - first.rate;
                Self {
                    current,
                    change,
                    percentage: (change / first.rate) * 100.0,
                }
            }
            _ => Self {
                current,
                change: 0.0,
                percentage: 0.0,
            },
        }
    }
}

const MOCK_BASE_RATES: [(&str, &str, f64); 16] = [
    ("USD", "INR", 83.25),
    ("EUR", "INR", 89.50),
    ("GBP", "INR", 104.75),
    ("JPY", "INR", 0.56),
    ("AUD", "INR", 54.30),
    ("CAD", "INR", 61.20),
    ("CHF", "INR", 92.15),
    ("CNY", "INR", 11.45),
    ("INR", "USD", 0.012),
    ("INR", "EUR", 0.011),
    ("INR", "GBP", 0.0095),
    ("INR", "JPY", 1.78),
    ("INR", "AUD", 0.018),
    ("INR", "CAD", 0.016),
    ("INR", "CHF", 0.011),
    ("INR", "CNY", 0.087),
];

// Each point deviates at most half of this from the base rate
const FLUCTUATION: f64 = 0.1;

/// Demo series: random daily fluctuation of up to 5% around a fixed rate.
pub struct MockHistoryGenerator {
    rng: Mutex<StdRng>,
}

impl MockHistoryGenerator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn base_rate(from: &str, to: &str) -> f64 {
        MOCK_BASE_RATES
            .iter()
            .find(|(f, t, _)| *f == from && *t == to)
            .map_or(1.0, |(_, _, rate)| *rate)
    }

    pub fn generate(
        &self,
        from: &str,
        to: &str,
        days: u32,
        today: NaiveDate,
    ) -> Vec<HistoricalPoint> {
        let base = Self::base_rate(from, to);
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        (0..days)
            .rev()
            .map(|offset| {
                let fluctuation = (rng.random::<f64>() - 0.5) * FLUCTUATION;
                HistoricalPoint {
                    date: today - Duration::days(offset as i64),
                    rate: round_to(base * (1.0 + fluctuation), 4),
                }
            })
            .collect()
    }
}

impl Default for MockHistoryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoricalRateProvider for MockHistoryGenerator {
    async fn fetch_history(
        &self,
        from: &str,
        to: &str,
        period: HistoricalPeriod,
    ) -> Result<Vec<HistoricalPoint>> {
        debug!(%from, %to, %period, "Generating mock history");
        Ok(self.generate(from, to, period.days(), Utc::now().date_naive()))
    }
}
