//! Path date segments.
//!
//! Clients send dates as `YYYYMMDD`. The data layer works in `YYYY-MM-DD`, so
//! segments are parsed to `NaiveDate` here and never passed through as text.

use chrono::NaiveDate;

use crate::error::ApiError;

pub const WIRE_DATE_FORMAT: &str = "%Y%m%d";

/// Parse an 8-digit `YYYYMMDD` path segment.
pub fn parse_wire_date(segment: &str) -> Result<NaiveDate, ApiError> {
    if segment.len() != 8 || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::malformed_date(segment, "expected 8 digits"));
    }

    NaiveDate::parse_from_str(segment, WIRE_DATE_FORMAT)
        .map_err(|e| ApiError::malformed_date(segment, e.to_string()))
}

/// Render a date in wire form.
pub fn format_wire_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}
