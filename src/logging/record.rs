//! A single structured log event and its wire encoding.
//!
//! # Wire Format
//! One JSON object per line, fixed keys first:
//! ```text
//! {"timestamp":"2024-05-01T12:00:00.000000000Z","severity":"INFO","message":"...",<fields>}
//! ```
//!
//! A caller field that reuses a fixed key is kept under `fields.<key>`.
//! If the caller already supplied `fields.<key>` itself, that value wins and
//! the clashing one is dropped.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::logging::fields::Fields;
use crate::logging::level::LogLevel;
use crate::logging::severity::{self, Severity};

pub const TIMESTAMP_KEY: &str = "timestamp";
pub const SEVERITY_KEY: &str = "severity";
pub const MESSAGE_KEY: &str = "message";

/// Keys every record carries, in wire order.
pub const FIXED_KEYS: [&str; 3] = [TIMESTAMP_KEY, SEVERITY_KEY, MESSAGE_KEY];

const CLASH_PREFIX: &str = "fields.";

/// An immutable log event, consumed by encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    timestamp: DateTime<Utc>,
    severity: Severity,
    message: String,
    fields: Fields,
}

impl LogRecord {
    /// Build a record stamped with the current wall clock.
    pub fn new(level: LogLevel, message: impl Into<String>, fields: Fields) -> Self {
        Self::at(Utc::now(), level, message, fields)
    }

    /// Build a record with an explicit timestamp.
    pub fn at(
        timestamp: DateTime<Utc>,
        level: LogLevel,
        message: impl Into<String>,
        fields: Fields,
    ) -> Self {
        Self {
            timestamp,
            severity: severity::map(level),
            message: message.into(),
            fields,
        }
    }

    /// Assemble the output object: fixed keys, then caller fields.
    pub fn into_object(self) -> Map<String, Value> {
        let mut object = Map::with_capacity(FIXED_KEYS.len() + self.fields.len());
        let timestamp = self.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true);
        object.insert(TIMESTAMP_KEY.to_string(), Value::String(timestamp));
        object.insert(
            SEVERITY_KEY.to_string(),
            Value::String(self.severity.as_str().to_string()),
        );
        object.insert(MESSAGE_KEY.to_string(), Value::String(self.message));

        let mut clashes = Vec::new();
        for (key, value) in self.fields {
            if FIXED_KEYS.contains(&key.as_str()) {
                clashes.push((format!("{CLASH_PREFIX}{key}"), value));
            } else {
                object.insert(key, value);
            }
        }
        for (key, value) in clashes {
            object.entry(key).or_insert(value);
        }

        object
    }

    /// Encode as a single JSON line, newline included.
    pub fn to_json_line(self) -> Result<Vec<u8>, serde_json::Error> {
        let mut line = serde_json::to_vec(&Value::Object(self.into_object()))?;
        line.push(b'\n');
        Ok(line)
    }
}
