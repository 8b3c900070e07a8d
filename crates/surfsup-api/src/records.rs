//! JSON record shapes returned by the `/api/v1.0` routes.

use serde::Serialize;
use surfsup_climate::{
    PrecipitationRecord, StationSummary, TemperatureObservation, TemperatureStats,
};

/// Round to two decimal places. Exact halves go to the even neighbour, so
/// `70.125` becomes `70.12`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecipitationEntry {
    pub date: String,
    pub prcp: Option<f64>,
}

impl From<PrecipitationRecord> for PrecipitationEntry {
    fn from(record: PrecipitationRecord) -> Self {
        Self {
            date: record.date,
            prcp: record.prcp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationEntry {
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    #[serde(rename = "Average Precipitation")]
    pub average_precipitation: Option<f64>,
    #[serde(rename = "Average Temperature")]
    pub average_temperature: f64,
}

impl From<StationSummary> for StationEntry {
    fn from(summary: StationSummary) -> Self {
        let station = summary.station;
        Self {
            station: station.code,
            name: station.name,
            latitude: station.latitude,
            longitude: station.longitude,
            elevation: station.elevation,
            average_precipitation: summary.avg_prcp.map(round2),
            average_temperature: round2(summary.avg_tobs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TobsEntry {
    pub date: String,
    pub tobs: f64,
}

impl From<TemperatureObservation> for TobsEntry {
    fn from(observation: TemperatureObservation) -> Self {
        Self {
            date: observation.date,
            tobs: observation.tobs,
        }
    }
}

/// `{TMIN, TMAX, TAVG}`; every field is null when the range matched nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct TemperatureEntry {
    pub tmin: Option<f64>,
    pub tmax: Option<f64>,
    pub tavg: Option<f64>,
}

impl From<TemperatureStats> for TemperatureEntry {
    fn from(stats: TemperatureStats) -> Self {
        Self {
            tmin: stats.min,
            tmax: stats.max,
            tavg: stats.avg.map(round2),
        }
    }
}
