//! Database models

use serde::Serialize;
use serde_json::Number;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// Minutes per person when a queue is created without one
pub const DEFAULT_TIME_PER_PERSON: i64 = 5;

/// Column list for reading a [`Queue`]
///
/// `time_per_person_type` carries the storage class SQLite picked for the
/// value, so integers and reals are each decoded without a lossy cast.
pub const QUEUE_COLUMNS: &str =
    "id, name, description, location, time_per_person, typeof(time_per_person) AS time_per_person_type";

/// A stored queue row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Queue {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub location: String,
    pub time_per_person: Number,
}

impl<'r> FromRow<'r, SqliteRow> for Queue {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let storage_class: String = row.try_get("time_per_person_type")?;
        let time_per_person = decode_minutes(row, &storage_class)?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row
                .try_get::<Option<String>, _>("description")?
                .unwrap_or_default(),
            location: row
                .try_get::<Option<String>, _>("location")?
                .unwrap_or_default(),
            time_per_person,
        })
    }
}

/// A queue about to be inserted, with defaults already applied
#[derive(Debug, Clone, PartialEq)]
pub struct NewQueue {
    pub name: String,
    pub description: String,
    pub location: String,
    pub time_per_person: Number,
}

impl NewQueue {
    /// Queue with the given name and default metadata
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            location: String::new(),
            time_per_person: Number::from(DEFAULT_TIME_PER_PERSON),
        }
    }
}

/// A stored queue member row
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct QueueMember {
    pub id: i64,
    pub queue_id: i64,
    pub name: String,
}

/// Decode `time_per_person` according to its SQLite storage class
fn decode_minutes(row: &SqliteRow, storage_class: &str) -> sqlx::Result<Number> {
    match storage_class {
        "integer" => Ok(Number::from(row.try_get::<i64, _>("time_per_person")?)),
        "real" => {
            let minutes: f64 = row.try_get("time_per_person")?;
            Number::from_f64(minutes).ok_or_else(|| decode_error(format!("non-finite value {}", minutes)))
        }
        other => Err(decode_error(format!("unexpected storage class {}", other))),
    }
}

fn decode_error(message: String) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: "time_per_person".to_string(),
        source: message.into(),
    }
}
