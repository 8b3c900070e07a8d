//! Climate backend trait and error types.
//!
//! `ClimateBackend` is the read-only query surface the HTTP layer depends on.
//! `SqliteClimateStore` is the production implementation.

use chrono::NaiveDate;
use surfsup_core::{DatabaseError, RusqliteErrorExt};
use thiserror::Error;

use crate::types::{
    DateWindow, PrecipitationRecord, StationActivity, StationSummary, TemperatureObservation,
    TemperatureStats,
};

/// Errors that can occur while querying the dataset.
#[derive(Debug, Error)]
pub enum ClimateError {
    /// The dataset has no rows for a query that needs at least one.
    #[error("No data available: {0}")]
    DataUnavailable(String),

    /// Storage error (connection, query, schema, bad stored values).
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// The blocking task running the query did not complete.
    #[error("Query task failed: {0}")]
    Task(String),
}

impl ClimateError {
    /// Create a data unavailable error.
    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::DataUnavailable(message.into())
    }

    /// Short message safe to show to API clients.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::DataUnavailable(_) => "The climate dataset has no measurements.",
            Self::Database(e) => e.user_message(),
            Self::Task(_) => "The query could not be completed.",
        }
    }
}

impl From<rusqlite::Error> for ClimateError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.into_database_error())
    }
}

/// Result type for climate backend operations.
pub type ClimateResult<T> = Result<T, ClimateError>;

/// Read-only queries over the `station` and `measurement` relations.
///
/// Note: Implementations don't need to be Sync - `ClimateClient` handles
/// thread-safe access via Mutex.
pub trait ClimateBackend: Send {
    /// Latest measurement date.
    ///
    /// # Errors
    /// Returns `ClimateError::DataUnavailable` if there are no measurements.
    fn most_recent_date(&self) -> ClimateResult<NaiveDate>;

    /// Earliest measurement date.
    ///
    /// # Errors
    /// Returns `ClimateError::DataUnavailable` if there are no measurements.
    fn earliest_date(&self) -> ClimateResult<NaiveDate>;

    /// Precipitation readings inside `window`, ordered by date ascending.
    /// Null readings are kept.
    fn precipitation_series(&self, window: &DateWindow) -> ClimateResult<Vec<PrecipitationRecord>>;

    /// One summary per station that has at least one measurement.
    fn station_summaries(&self) -> ClimateResult<Vec<StationSummary>>;

    /// Station with the most measurement rows across the whole dataset.
    /// Equal counts go to the lowest station code.
    ///
    /// # Errors
    /// Returns `ClimateError::DataUnavailable` if there are no measurements.
    fn most_active_station(&self) -> ClimateResult<StationActivity>;

    /// Temperature readings for one station inside `window`, ordered by date.
    fn station_observations(
        &self,
        station: &str,
        window: &DateWindow,
    ) -> ClimateResult<Vec<TemperatureObservation>>;

    /// Min, max and mean observed temperature inside `window`.
    fn temperature_stats(&self, window: &DateWindow) -> ClimateResult<TemperatureStats>;

    /// `[most recent - 365 days, most recent]`
    fn trailing_year(&self) -> ClimateResult<DateWindow> {
        Ok(DateWindow::trailing_year(self.most_recent_date()?))
    }

    /// Temperature readings of the most active station inside `window`.
    fn most_active_station_observations(
        &self,
        window: &DateWindow,
    ) -> ClimateResult<Vec<TemperatureObservation>> {
        let activity = self.most_active_station()?;
        tracing::debug!(
            "Most active station: {} ({} measurements)",
            activity.code,
            activity.count
        );
        self.station_observations(&activity.code, window)
    }
}
