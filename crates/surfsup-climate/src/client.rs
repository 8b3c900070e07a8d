//! Async client over a shared climate backend.
//!
//! `ClimateClient` owns one backend behind a mutex. Each call runs on tokio's
//! blocking pool and holds the lock only for the duration of its query.

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;

use crate::backend::{ClimateBackend, ClimateError, ClimateResult};
use crate::store::SqliteClimateStore;
use crate::types::{
    DateWindow, PrecipitationRecord, StationSummary, TemperatureObservation, TemperatureStats,
};

/// Cloneable handle shared by all request handlers.
#[derive(Clone)]
pub struct ClimateClient {
    backend: Arc<Mutex<Box<dyn ClimateBackend>>>,
}

impl ClimateClient {
    /// Create a client over any backend.
    pub fn new(backend: impl ClimateBackend + 'static) -> Self {
        let backend: Box<dyn ClimateBackend> = Box::new(backend);
        Self {
            backend: Arc::new(Mutex::new(backend)),
        }
    }

    /// Create a client over the SQLite dataset.
    pub fn sqlite(store: SqliteClimateStore) -> Self {
        Self::new(store)
    }

    /// Run `op` against the backend on the blocking pool.
    async fn run<T, F>(&self, op: F) -> ClimateResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn ClimateBackend) -> ClimateResult<T> + Send + 'static,
    {
        let backend = self.backend.clone();
        tokio::task::spawn_blocking(move || {
            let guard = backend.lock();
            op(&**guard)
        })
        .await
        .map_err(|e| ClimateError::Task(e.to_string()))?
    }

    pub async fn most_recent_date(&self) -> ClimateResult<NaiveDate> {
        self.run(|b| b.most_recent_date()).await
    }

    pub async fn earliest_date(&self) -> ClimateResult<NaiveDate> {
        self.run(|b| b.earliest_date()).await
    }

    /// Window of the year ending at the most recent measurement.
    pub async fn trailing_year(&self) -> ClimateResult<DateWindow> {
        self.run(|b| b.trailing_year()).await
    }

    pub async fn precipitation_series(
        &self,
        window: DateWindow,
    ) -> ClimateResult<Vec<PrecipitationRecord>> {
        self.run(move |b| b.precipitation_series(&window)).await
    }

    pub async fn station_summaries(&self) -> ClimateResult<Vec<StationSummary>> {
        self.run(|b| b.station_summaries()).await
    }

    pub async fn most_active_station_observations(
        &self,
        window: DateWindow,
    ) -> ClimateResult<Vec<TemperatureObservation>> {
        self.run(move |b| b.most_active_station_observations(&window))
            .await
    }

    pub async fn temperature_stats(&self, window: DateWindow) -> ClimateResult<TemperatureStats> {
        self.run(move |b| b.temperature_stats(&window)).await
    }
}
