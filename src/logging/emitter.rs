//! Structured record emitter.
//!
//! # Responsibilities
//! - Drop events below the configured minimum level
//! - Resolve severity and timestamp, merge caller fields
//! - Write each record as one line under a single writer lock
//! - Report write failures to the fallback writer, never to the caller
//!
//! # Design Decisions
//! - Cloning an `Emitter` shares the sink; there is no global logger
//! - The record is fully encoded before the lock is taken, so the lock is
//!   held only for one `write_all` + `flush`
//! - A poisoned lock is recovered: a panic elsewhere must not silence logging

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::logging::fields::Fields;
use crate::logging::level::LogLevel;
use crate::logging::record::LogRecord;

type Writer = Box<dyn Write + Send>;

/// Why a record could not be emitted.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to encode log record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write log record: {0}")]
    Write(#[from] io::Error),
}

/// Handle to the process's structured log sink.
#[derive(Clone)]
pub struct Emitter {
    inner: Arc<Inner>,
}

struct Inner {
    min_level: LogLevel,
    sink: Mutex<Writer>,
    fallback: Mutex<Writer>,
}

impl Emitter {
    pub fn builder() -> EmitterBuilder {
        EmitterBuilder::default()
    }

    /// Emitter writing to stdout, reporting failures on stderr.
    pub fn stdout(min_level: LogLevel) -> Self {
        Self::builder().min_level(min_level).build()
    }

    /// Whether an event at `level` would be written.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.inner.min_level
    }

    /// Emit one record. Failures are reported to the fallback writer.
    pub fn emit(&self, level: LogLevel, message: impl Into<String>, fields: Fields) {
        if let Err(err) = self.try_emit(level, message, fields) {
            self.report(level, &err);
        }
    }

    /// Emit one record, returning any encode or write failure.
    pub fn try_emit(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        fields: Fields,
    ) -> Result<(), EmitError> {
        if !self.enabled(level) {
            return Ok(());
        }
        self.write_record(LogRecord::new(level, message, fields))
    }

    /// Emit one record regardless of the minimum level.
    ///
    /// For records that must exist for every occurrence, such as request
    /// completion.
    pub fn emit_always(&self, level: LogLevel, message: impl Into<String>, fields: Fields) {
        if let Err(err) = self.write_record(LogRecord::new(level, message, fields)) {
            self.report(level, &err);
        }
    }

    fn write_record(&self, record: LogRecord) -> Result<(), EmitError> {
        let line = record.to_json_line()?;

        let mut sink = self
            .inner
            .sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        sink.write_all(&line)?;
        sink.flush()?;
        Ok(())
    }

    pub fn trace(&self, message: impl Into<String>, fields: Fields) {
        self.emit(LogLevel::Trace, message, fields);
    }

    pub fn debug(&self, message: impl Into<String>, fields: Fields) {
        self.emit(LogLevel::Debug, message, fields);
    }

    pub fn info(&self, message: impl Into<String>, fields: Fields) {
        self.emit(LogLevel::Info, message, fields);
    }

    pub fn warn(&self, message: impl Into<String>, fields: Fields) {
        self.emit(LogLevel::Warn, message, fields);
    }

    pub fn error(&self, message: impl Into<String>, fields: Fields) {
        self.emit(LogLevel::Error, message, fields);
    }

    fn report(&self, level: LogLevel, err: &EmitError) {
        let mut fallback = self
            .inner
            .fallback
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Nowhere left to report to if this fails.
        let _ = writeln!(fallback, "cloudlog: dropped {level} record: {err}");
        let _ = fallback.flush();
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("min_level", &self.inner.min_level)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Emitter`]. Defaults to stdout, stderr and `Info`.
pub struct EmitterBuilder {
    min_level: LogLevel,
    sink: Writer,
    fallback: Writer,
}

impl Default for EmitterBuilder {
    fn default() -> Self {
        Self {
            min_level: LogLevel::default(),
            sink: Box::new(io::stdout()),
            fallback: Box::new(io::stderr()),
        }
    }
}

impl EmitterBuilder {
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn fallback(mut self, fallback: impl Write + Send + 'static) -> Self {
        self.fallback = Box::new(fallback);
        self
    }

    pub fn build(self) -> Emitter {
        Emitter {
            inner: Arc::new(Inner {
                min_level: self.min_level,
                sink: Mutex::new(self.sink),
                fallback: Mutex::new(self.fallback),
            }),
        }
    }
}
