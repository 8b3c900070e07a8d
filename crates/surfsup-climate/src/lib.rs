//! Read-only access to the climate station dataset.
//!
//! Provides the SQLite-backed store, the backend trait it implements, and an
//! async client that shares one connection across requests.

pub mod backend;
pub mod client;
pub mod schema;
pub mod store;
pub mod types;

pub use backend::{ClimateBackend, ClimateError, ClimateResult};
pub use client::ClimateClient;
pub use store::SqliteClimateStore;
pub use types::{
    DateWindow, PrecipitationRecord, Station, StationActivity, StationSummary,
    TemperatureObservation, TemperatureStats, STORED_DATE_FORMAT,
};
