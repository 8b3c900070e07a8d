use chrono::{Days, NaiveDate};

/// Format of the `measurement.date` column. Fixed width and zero padded, so
/// string comparison orders dates correctly.
pub const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the trailing window anchored at the most recent measurement.
const TRAILING_YEAR_DAYS: u64 = 365;

/// Inclusive date range used to filter measurements.
///
/// No ordering check is made: a window whose start is after its end is a
/// valid query that simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `[anchor - 365 days, anchor]`
    pub fn trailing_year(anchor: NaiveDate) -> Self {
        let start = anchor
            .checked_sub_days(Days::new(TRAILING_YEAR_DAYS))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: anchor }
    }

    /// Lower bound in stored `YYYY-MM-DD` form.
    pub fn start_key(&self) -> String {
        self.start.format(STORED_DATE_FORMAT).to_string()
    }

    /// Upper bound in stored `YYYY-MM-DD` form.
    pub fn end_key(&self) -> String {
        self.end.format(STORED_DATE_FORMAT).to_string()
    }
}

/// Station metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Station code, e.g. `USC00519281`
    pub code: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// A station with its averages over all of its measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSummary {
    pub station: Station,
    /// Mean of non-null precipitation values; `None` if every value is null.
    pub avg_prcp: Option<f64>,
    pub avg_tobs: f64,
}

/// How many measurements a station contributed to the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationActivity {
    pub code: String,
    pub count: i64,
}

/// One precipitation reading. `date` is the stored `YYYY-MM-DD` value.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationRecord {
    pub date: String,
    pub prcp: Option<f64>,
}

/// One observed temperature reading.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureObservation {
    pub date: String,
    pub tobs: f64,
}

/// Aggregate temperature over a date range. All fields are `None` when no
/// measurement falls in the range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

impl TemperatureStats {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.avg.is_none()
    }
}
