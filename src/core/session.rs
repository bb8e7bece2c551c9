//! Conversion session: ties rate fetching, conversion and the history log together

use super::error::{FxError, Result};
use super::favorites::FavoritesStore;
use super::history::{ConversionRecord, HistoryLog};
use super::rates::{RateProvider, RateTable};
use crate::store::KeyValueStorage;
use std::sync::Arc;
use tracing::{debug, warn};

/// State shared by every consumer of the engine.
///
/// Favorites and history are only changed through their store methods.
pub struct SessionState {
    favorites: FavoritesStore,
    history: HistoryLog,
}

impl SessionState {
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            favorites: FavoritesStore::load(Arc::clone(&storage)),
            history: HistoryLog::load(storage),
        }
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesStore {
        &mut self.favorites
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryLog {
        &mut self.history
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Idle,
    Fetching,
    Ready,
    Failed(String),
}

/// Handle for one issued rate fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    id: u64,
    base: String,
}

impl FetchTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

pub struct ConversionSession {
    provider: Arc<dyn RateProvider>,
    amount: f64,
    from: String,
    to: String,
    table: Option<RateTable>,
    status: SessionStatus,
    latest_ticket: u64,
}

impl ConversionSession {
    pub fn new(provider: Arc<dyn RateProvider>, amount: f64, from: &str, to: &str) -> Self {
        Self {
            provider,
            amount,
            from: from.to_string(),
            to: to.to_string(),
            table: None,
            status: SessionStatus::Idle,
            latest_ticket: 0,
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn from_currency(&self) -> &str {
        &self.from
    }

    pub fn to_currency(&self) -> &str {
        &self.to
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn table(&self) -> Option<&RateTable> {
        self.table.as_ref()
    }

    /// Rate for the current pair, once a table for `from` is loaded.
    pub fn rate(&self) -> Option<f64> {
        self.lookup_rate().ok()
    }

    /// Marks a new fetch for the current base currency as in flight.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_ticket += 1;
        self.status = SessionStatus::Fetching;
        debug!(id = self.latest_ticket, base = %self.from, "Issuing rate fetch");
        FetchTicket {
            id: self.latest_ticket,
            base: self.from.clone(),
        }
    }

    /// Applies the outcome of a fetch.
    ///
    /// Completions for anything but the latest ticket are dropped. On success
    /// the conversion is recomputed and logged to `state`.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<RateTable>,
        state: &mut SessionState,
    ) -> Option<ConversionRecord> {
        if ticket.id != self.latest_ticket {
            debug!(
                id = ticket.id,
                latest = self.latest_ticket,
                "Discarding stale rate response"
            );
            return None;
        }

        match result {
            Ok(table) => {
                self.table = Some(table);
                self.status = SessionStatus::Ready;
                self.record(state)
            }
            Err(e) => {
                warn!(error = %e, base = %ticket.base, "Exchange rate unavailable");
                self.table = None;
                self.status = SessionStatus::Failed(e.to_string());
                None
            }
        }
    }

    /// Fetches rates for the current base and converts. Also the retry path
    /// after a failure.
    pub async fn refresh(&mut self, state: &mut SessionState) -> Option<ConversionRecord> {
        let ticket = self.begin_fetch();
        let result = self.provider.fetch_rates(ticket.base()).await;
        self.complete_fetch(ticket, result, state)
    }

    /// Changes both currencies; a change triggers exactly one fetch.
    pub async fn set_pair(
        &mut self,
        from: &str,
        to: &str,
        state: &mut SessionState,
    ) -> Option<ConversionRecord> {
        if self.from == from && self.to == to {
            return None;
        }
        self.from = from.to_string();
        self.to = to.to_string();
        self.refresh(state).await
    }

    pub async fn set_from(
        &mut self,
        from: &str,
        state: &mut SessionState,
    ) -> Option<ConversionRecord> {
        let to = self.to.clone();
        self.set_pair(from, &to, state).await
    }

    pub async fn set_to(
        &mut self,
        to: &str,
        state: &mut SessionState,
    ) -> Option<ConversionRecord> {
        let from = self.from.clone();
        self.set_pair(&from, to, state).await
    }

    pub async fn swap(&mut self, state: &mut SessionState) -> Option<ConversionRecord> {
        let (from, to) = (self.to.clone(), self.from.clone());
        self.set_pair(&from, &to, state).await
    }

    /// Changes the amount and recomputes with the already loaded table.
    pub fn set_amount(
        &mut self,
        amount: f64,
        state: &mut SessionState,
    ) -> Option<ConversionRecord> {
        if self.amount == amount {
            return None;
        }
        self.amount = amount;
        if self.status != SessionStatus::Ready {
            return None;
        }
        self.record(state)
    }

    fn lookup_rate(&self) -> Result<f64> {
        let table = self.table.as_ref().ok_or_else(|| FxError::MissingRate {
            base: self.from.clone(),
            to: self.to.clone(),
        })?;
        table.get(&self.to).ok_or_else(|| FxError::MissingRate {
            base: table.base().to_string(),
            to: self.to.clone(),
        })
    }

    fn record(&self, state: &mut SessionState) -> Option<ConversionRecord> {
        let res = self
            .lookup_rate()
            .and_then(|rate| ConversionRecord::new(self.amount, &self.from, &self.to, rate));
        match res {
            Ok(record) => {
                state.history_mut().append(record.clone());
                Some(record)
            }
            Err(e @ FxError::MissingRate { .. }) => {
                debug!(error = %e, "Conversion unavailable");
                None
            }
            Err(e) => {
                warn!(error = %e, "Conversion failed");
                None
            }
        }
    }
}
