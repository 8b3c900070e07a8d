//! Route handlers.
//!
//! Handlers never reject: application errors are rendered as JSON error
//! responses so that a failing route cannot fall through to the next one.

use chrono::NaiveDate;
use serde::Serialize;
use std::convert::Infallible;
use surfsup_climate::{ClimateClient, DateWindow};
use warp::reply::Response;
use warp::Reply;

use crate::dates::{format_wire_date, parse_wire_date};
use crate::error::ApiError;
use crate::records::{PrecipitationEntry, StationEntry, TemperatureEntry, TobsEntry};

fn json_response<T: Serialize>(result: Result<T, ApiError>) -> Response {
    match result {
        Ok(body) => warp::reply::json(&body).into_response(),
        Err(e) => e.into_response(),
    }
}

/// `GET /`
pub async fn index(client: ClimateClient) -> Result<Response, Infallible> {
    let range = match (client.earliest_date().await, client.most_recent_date().await) {
        (Ok(first), Ok(last)) => Some((first, last)),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("Dataset range unavailable for index page: {}", e);
            None
        }
    };

    Ok(warp::reply::html(index_page(range)).into_response())
}

/// Human-readable route listing.
pub fn index_page(range: Option<(NaiveDate, NaiveDate)>) -> String {
    let range_line = match range {
        Some((first, last)) => format!(
            "- Date Range: {}-{}<br/>",
            format_wire_date(first),
            format_wire_date(last)
        ),
        None => "- Date Range: no measurements loaded<br/>".to_string(),
    };

    format!(
        "<b>Available Routes:</b><br/><br/>\
         <b>/api/v1.0/precipitation</b><br/>\
         - Precipitation readings for the last 12 months of data, as a list of {{date, prcp}}.<br/><br/>\
         <b>/api/v1.0/stations</b><br/>\
         - All stations with at least one measurement, with average precipitation and temperature.<br/><br/>\
         <b>/api/v1.0/tobs</b><br/>\
         - Temperature observations of the most active station for the last 12 months of data.<br/><br/>\
         <b>/api/v1.0/&lt;start&gt;</b><br/>\
         - Minimum, average and maximum temperature from the start date to the last measurement.<br/>\
         - Date format: YYYYMMDD<br/>\
         {range}<br/>\
         <b>/api/v1.0/&lt;start&gt;/&lt;end&gt;</b><br/>\
         - Minimum, average and maximum temperature between start and end, inclusive.<br/>\
         - Date format: YYYYMMDD<br/>\
         {range}",
        range = range_line
    )
}

/// `GET /api/v1.0/precipitation`
pub async fn precipitation(client: ClimateClient) -> Result<Response, Infallible> {
    Ok(json_response(precipitation_entries(&client).await))
}

async fn precipitation_entries(client: &ClimateClient) -> Result<Vec<PrecipitationEntry>, ApiError> {
    let window = client.trailing_year().await?;
    let records = client.precipitation_series(window).await?;
    Ok(records.into_iter().map(PrecipitationEntry::from).collect())
}

/// `GET /api/v1.0/stations`
pub async fn stations(client: ClimateClient) -> Result<Response, Infallible> {
    Ok(json_response(station_entries(&client).await))
}

async fn station_entries(client: &ClimateClient) -> Result<Vec<StationEntry>, ApiError> {
    let summaries = client.station_summaries().await?;
    Ok(summaries.into_iter().map(StationEntry::from).collect())
}

/// `GET /api/v1.0/tobs`
pub async fn tobs(client: ClimateClient) -> Result<Response, Infallible> {
    Ok(json_response(tobs_entries(&client).await))
}

async fn tobs_entries(client: &ClimateClient) -> Result<Vec<TobsEntry>, ApiError> {
    let window = client.trailing_year().await?;
    let observations = client.most_active_station_observations(window).await?;
    Ok(observations.into_iter().map(TobsEntry::from).collect())
}

/// `GET /api/v1.0/<start>`; the range ends at the most recent measurement.
pub async fn temperature_from(start: String, client: ClimateClient) -> Result<Response, Infallible> {
    Ok(json_response(temperature_from_entries(&start, &client).await))
}

async fn temperature_from_entries(
    start: &str,
    client: &ClimateClient,
) -> Result<Vec<TemperatureEntry>, ApiError> {
    let start = parse_wire_date(start)?;
    let end = client.most_recent_date().await?;
    temperature_entries(client, DateWindow::new(start, end)).await
}

/// `GET /api/v1.0/<start>/<end>`
pub async fn temperature_range(
    start: String,
    end: String,
    client: ClimateClient,
) -> Result<Response, Infallible> {
    Ok(json_response(temperature_range_entries(&start, &end, &client).await))
}

async fn temperature_range_entries(
    start: &str,
    end: &str,
    client: &ClimateClient,
) -> Result<Vec<TemperatureEntry>, ApiError> {
    let window = DateWindow::new(parse_wire_date(start)?, parse_wire_date(end)?);
    temperature_entries(client, window).await
}

/// Always a single-element list, null-filled when nothing matched.
async fn temperature_entries(
    client: &ClimateClient,
    window: DateWindow,
) -> Result<Vec<TemperatureEntry>, ApiError> {
    let stats = client.temperature_stats(window).await?;
    if stats.is_empty() {
        tracing::debug!(
            "No measurements between {} and {}",
            window.start_key(),
            window.end_key()
        );
    }
    Ok(vec![TemperatureEntry::from(stats)])
}
