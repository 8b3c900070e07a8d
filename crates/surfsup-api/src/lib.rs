//! HTTP layer for the SurfsUp climate API.
//!
//! Maps `/api/v1.0/*` routes onto `ClimateClient` queries and shapes the
//! results as JSON lists of flat records.

pub mod dates;
pub mod error;
pub mod handlers;
pub mod records;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{api, routes};
pub use server::{bind, serve, shutdown_signal};
