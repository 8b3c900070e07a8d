//! Declared layout of the climate dataset.
//!
//! The store never creates or alters tables in the dataset it serves. It only
//! checks on open that the declared columns are present. `CREATE_TABLES` is
//! the matching DDL, used to build fixture databases.

use rusqlite::Connection;
use surfsup_core::DatabaseError;

use crate::backend::ClimateResult;

/// A table and the columns the queries rely on.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub const STATION: TableSchema = TableSchema {
    name: "station",
    columns: &["station", "name", "latitude", "longitude", "elevation"],
};

pub const MEASUREMENT: TableSchema = TableSchema {
    name: "measurement",
    columns: &["station", "date", "prcp", "tobs"],
};

pub const TABLES: [TableSchema; 2] = [STATION, MEASUREMENT];

pub const CREATE_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS station (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        name TEXT NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        elevation REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS measurement (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        date TEXT NOT NULL,
        prcp REAL,
        tobs REAL NOT NULL
    );
"#;

/// Check that every declared table and column exists.
pub fn verify(conn: &Connection) -> ClimateResult<()> {
    for table in TABLES {
        let columns: Vec<String> = conn
            .prepare(&format!("PRAGMA table_info({})", table.name))?
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;

        if columns.is_empty() {
            return Err(DatabaseError::MissingTable(table.name.to_string()).into());
        }

        if let Some(missing) = table
            .columns
            .iter()
            .find(|wanted| !columns.iter().any(|c| c.eq_ignore_ascii_case(wanted)))
        {
            return Err(DatabaseError::SchemaMismatch {
                table: table.name.to_string(),
                column: (*missing).to_string(),
            }
            .into());
        }
    }

    tracing::debug!("Dataset schema verified");
    Ok(())
}
