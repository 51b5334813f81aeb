//! External severity vocabulary and the level → severity mapping.
//!
//! # Design Decisions
//! - Exhaustive match with no wildcard arm: a new `LogLevel` variant will
//!   not compile until it is given a severity here
//! - Every emission path (direct calls, request completion, tracing
//!   bridge) resolves severity through [`map`]

use std::fmt;

use serde::Serialize;

use crate::logging::level::LogLevel;

/// Severity names understood by the cloud logging platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LogLevel> for Severity {
    fn from(level: LogLevel) -> Self {
        map(level)
    }
}

/// Translate an internal level to its external severity.
pub const fn map(level: LogLevel) -> Severity {
    match level {
        LogLevel::Trace | LogLevel::Debug => Severity::Debug,
        LogLevel::Info => Severity::Info,
        LogLevel::Warn => Severity::Warning,
        LogLevel::Error => Severity::Error,
        LogLevel::Fatal | LogLevel::Panic => Severity::Critical,
    }
}
