//! SQLite-backed climate store.
//!
//! This module provides `SqliteClimateStore`, the `ClimateBackend`
//! implementation over the `station` and `measurement` tables. All range
//! filters compare `YYYY-MM-DD` strings.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::Path;
use surfsup_core::DatabaseError;

use crate::backend::{ClimateBackend, ClimateError, ClimateResult};
use crate::schema;
use crate::types::{
    DateWindow, PrecipitationRecord, Station, StationActivity, StationSummary,
    TemperatureObservation, TemperatureStats, STORED_DATE_FORMAT,
};

/// Read-only view over the climate dataset.
pub struct SqliteClimateStore {
    conn: Connection,
}

impl SqliteClimateStore {
    /// Open the dataset at `path` read-only.
    ///
    /// Fails if the file is missing or lacks a declared table or column.
    pub fn open<P: AsRef<Path>>(path: P) -> ClimateResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
                | OpenFlags::SQLITE_OPEN_URI,
        )
        .map_err(|e| {
            DatabaseError::ConnectionFailed(format!("{}: {}", path.display(), e))
        })?;

        let store = Self::from_connection(conn)?;
        tracing::info!(
            "Opened climate dataset at {} ({} measurements)",
            path.display(),
            store.measurement_count()?
        );
        Ok(store)
    }

    /// Wrap an existing connection after checking its schema.
    pub fn from_connection(conn: Connection) -> ClimateResult<Self> {
        schema::verify(&conn)?;
        Ok(Self { conn })
    }

    /// Create an in-memory store with the declared schema (for testing).
    #[cfg(test)]
    pub fn in_memory() -> ClimateResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::CREATE_TABLES)?;
        Self::from_connection(conn)
    }

    /// Single-date aggregate over `measurement.date` (`MIN` or `MAX`).
    fn boundary_date(&self, aggregate: &str) -> ClimateResult<NaiveDate> {
        let value: Option<String> = self.conn.query_row(
            &format!("SELECT {}(date) FROM measurement", aggregate),
            [],
            |row| row.get(0),
        )?;

        let value = value
            .ok_or_else(|| ClimateError::data_unavailable("measurement table is empty"))?;

        parse_stored_date(&value)
    }

    /// Convert a joined station/aggregate row to a StationSummary.
    fn row_to_summary(row: &rusqlite::Row) -> rusqlite::Result<StationSummary> {
        Ok(StationSummary {
            station: Station {
                code: row.get(0)?,
                name: row.get(1)?,
                latitude: row.get(2)?,
                longitude: row.get(3)?,
                elevation: row.get(4)?,
            },
            avg_prcp: row.get(5)?,
            avg_tobs: row.get(6)?,
        })
    }

    /// Number of measurement rows.
    fn measurement_count(&self) -> ClimateResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM measurement", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn parse_stored_date(value: &str) -> ClimateResult<NaiveDate> {
    NaiveDate::parse_from_str(value, STORED_DATE_FORMAT).map_err(|e| {
        DatabaseError::Corruption(format!("measurement.date {:?}: {}", value, e)).into()
    })
}

impl ClimateBackend for SqliteClimateStore {
    fn most_recent_date(&self) -> ClimateResult<NaiveDate> {
        self.boundary_date("MAX")
    }

    fn earliest_date(&self) -> ClimateResult<NaiveDate> {
        self.boundary_date("MIN")
    }

    fn precipitation_series(&self, window: &DateWindow) -> ClimateResult<Vec<PrecipitationRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, prcp
             FROM measurement
             WHERE date BETWEEN ?1 AND ?2
             ORDER BY date",
        )?;

        let rows = stmt.query_map(params![window.start_key(), window.end_key()], |row| {
            Ok(PrecipitationRecord {
                date: row.get(0)?,
                prcp: row.get(1)?,
            })
        })?;

        let records = rows.collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(
            "Precipitation {}..{}: {} records",
            window.start_key(),
            window.end_key(),
            records.len()
        );
        Ok(records)
    }

    fn station_summaries(&self) -> ClimateResult<Vec<StationSummary>> {
        // Inner join: stations without measurements drop out. AVG skips nulls.
        let mut stmt = self.conn.prepare(
            "SELECT s.station, s.name, s.latitude, s.longitude, s.elevation,
                    AVG(m.prcp), AVG(m.tobs)
             FROM station s
             JOIN measurement m ON m.station = s.station
             GROUP BY s.station, s.name
             ORDER BY s.station",
        )?;

        let rows = stmt.query_map([], Self::row_to_summary)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn most_active_station(&self) -> ClimateResult<StationActivity> {
        self.conn
            .query_row(
                "SELECT station, COUNT(*) AS n
                 FROM measurement
                 GROUP BY station
                 ORDER BY n DESC, station ASC
                 LIMIT 1",
                [],
                |row| {
                    Ok(StationActivity {
                        code: row.get(0)?,
                        count: row.get(1)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| ClimateError::data_unavailable("measurement table is empty"))
    }

    fn station_observations(
        &self,
        station: &str,
        window: &DateWindow,
    ) -> ClimateResult<Vec<TemperatureObservation>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, tobs
             FROM measurement
             WHERE station = ?1 AND date BETWEEN ?2 AND ?3
             ORDER BY date",
        )?;

        let rows = stmt.query_map(
            params![station, window.start_key(), window.end_key()],
            |row| {
                Ok(TemperatureObservation {
                    date: row.get(0)?,
                    tobs: row.get(1)?,
                })
            },
        )?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn temperature_stats(&self, window: &DateWindow) -> ClimateResult<TemperatureStats> {
        // Aggregates without GROUP BY always yield one row; NULLs when nothing matched.
        let stats = self.conn.query_row(
            "SELECT MIN(tobs), MAX(tobs), AVG(tobs)
             FROM measurement
             WHERE date BETWEEN ?1 AND ?2",
            params![window.start_key(), window.end_key()],
            |row| {
                Ok(TemperatureStats {
                    min: row.get(0)?,
                    max: row.get(1)?,
                    avg: row.get(2)?,
                })
            },
        )?;
        Ok(stats)
    }
}
