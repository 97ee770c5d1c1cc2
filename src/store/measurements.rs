use std::path::Path;
use std::time::Duration;

use rusqlite::{params, Connection, Row};
use tracing::{debug, info};

use crate::error::MangroveError;
use crate::models::{validate_fields, Observation};

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS measurements (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    light_intensity REAL NOT NULL,
    height          REAL NOT NULL
)";

const OBSERVATION_SELECT_SQL: &str = "SELECT id, light_intensity, height FROM measurements";

/// SQLite-backed store of measurement observations.
///
/// One table, one file. The schema is created idempotently on open, so a
/// fresh path and an existing database are handled the same way.
pub struct MeasurementStore {
    conn: Connection,
}

impl MeasurementStore {
    /// Open (or create) the database file at `path` and ensure the schema
    /// exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MangroveError> {
        let conn = Connection::open(path.as_ref())?;
        info!(path = %path.as_ref().display(), "opened measurement database");
        Self::bootstrap(conn)
    }

    /// Open an in-memory database, used by tests and never persisted.
    pub fn open_in_memory() -> Result<Self, MangroveError> {
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self, MangroveError> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute(SCHEMA_SQL, [])?;
        Ok(Self { conn })
    }

    /// Insert a new observation and return its store-assigned id.
    pub fn insert(&self, light_intensity: f64, height: f64) -> Result<i64, MangroveError> {
        validate_fields(light_intensity, height)?;

        self.conn.execute(
            "INSERT INTO measurements (light_intensity, height) VALUES (?1, ?2)",
            params![light_intensity, height],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, light_intensity, height, "inserted observation");
        Ok(id)
    }

    /// All current observations in insertion (id) order.
    pub fn list_all(&self) -> Result<Vec<Observation>, MangroveError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{OBSERVATION_SELECT_SQL} ORDER BY id ASC"))?;
        let mut rows = stmt.query([])?;

        let mut observations = Vec::new();
        while let Some(row) = rows.next()? {
            observations.push(parse_observation_row(row)?);
        }
        Ok(observations)
    }

    /// Look up a single observation by id.
    pub fn get(&self, id: i64) -> Result<Option<Observation>, MangroveError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{OBSERVATION_SELECT_SQL} WHERE id = ?1"))?;
        let mut rows = stmt.query(params![id])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_observation_row(row)?));
        }
        Ok(None)
    }

    /// Overwrite both fields of the observation with the given id.
    pub fn update_by_id(
        &self,
        id: i64,
        light_intensity: f64,
        height: f64,
    ) -> Result<(), MangroveError> {
        validate_fields(light_intensity, height)?;

        let changed = self.conn.execute(
            "UPDATE measurements SET light_intensity = ?1, height = ?2 WHERE id = ?3",
            params![light_intensity, height, id],
        )?;
        if changed == 0 {
            return Err(MangroveError::NotFound(id));
        }
        debug!(id, light_intensity, height, "updated observation");
        Ok(())
    }

    /// Remove the observation with the given id.
    pub fn delete_by_id(&self, id: i64) -> Result<(), MangroveError> {
        let changed = self
            .conn
            .execute("DELETE FROM measurements WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(MangroveError::NotFound(id));
        }
        debug!(id, "deleted observation");
        Ok(())
    }

    /// Remove every observation. Irreversible; callers are expected to have
    /// confirmed with the user first.
    pub fn delete_all(&self) -> Result<usize, MangroveError> {
        let removed = self.conn.execute("DELETE FROM measurements", [])?;
        info!(removed, "reset measurement database");
        Ok(removed)
    }

    /// Number of stored observations.
    pub fn count(&self) -> Result<usize, MangroveError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM measurements", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn parse_observation_row(row: &Row<'_>) -> Result<Observation, MangroveError> {
    Ok(Observation {
        id: row.get("id")?,
        light_intensity: row.get("light_intensity")?,
        height: row.get("height")?,
    })
}
