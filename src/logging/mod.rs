//! Structured logging subsystem.
//!
//! # Data Flow
//! ```text
//! emit(level, message, fields)          tracing::info!(...)
//!     │                                     │
//!     │                                 layer.rs (EmitterLayer)
//!     │                                     │
//!     └──────────────┬──────────────────────┘
//!                    ▼
//!             emitter.rs (min level check)
//!                    → severity.rs (LogLevel → Severity)
//!                    → record.rs (fixed keys + fields → one JSON line)
//!                    → sink (single writer lock, one write per line)
//!                    → fallback writer on failure (stderr)
//! ```
//!
//! # Design Decisions
//! - The Emitter is an explicit handle, cloned into whatever needs it
//! - Fixed keys (`timestamp`, `severity`, `message`) are never overwritten
//! - Emission never fails the caller; write errors go to the fallback

pub mod emitter;
pub mod fields;
pub mod layer;
pub mod level;
pub mod record;
pub mod severity;
pub mod sink;

pub use emitter::{EmitError, Emitter, EmitterBuilder};
pub use fields::Fields;
pub use layer::EmitterLayer;
pub use level::{LogLevel, ParseLevelError};
pub use record::LogRecord;
pub use severity::Severity;
pub use sink::MemorySink;
