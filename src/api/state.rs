//! Application state for the staffing match API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::StaffingStore;

/// Source of "today" for availability and dashboard windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// The current UTC date.
    #[default]
    System,
    /// A pinned date, for demos and tests.
    Fixed(NaiveDate),
}

impl Clock {
    /// Returns the reference date.
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Utc::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

/// Shared application state.
///
/// Contains resources that are shared across all request handlers:
/// the record store, the loaded matching configuration and the clock.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn StaffingStore>,
    config: Arc<ConfigLoader>,
    clock: Clock,
}

impl AppState {
    /// Creates a new application state reading the system clock.
    pub fn new(store: Arc<dyn StaffingStore>, config: ConfigLoader) -> Self {
        Self {
            store,
            config: Arc::new(config),
            clock: Clock::System,
        }
    }

    /// Replaces the clock.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the record store.
    pub fn store(&self) -> &dyn StaffingStore {
        self.store.as_ref()
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Today's date according to the configured clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}
