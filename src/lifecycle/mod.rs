//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → wait_for_signal() resolves
//!
//! Shutdown (shutdown.rs):
//!     trigger() → every ShutdownSignal resolves → server stops accepting → drain → exit
//! ```
//!
//! # Design Decisions
//! - Shutdown is a latch so tests can stop a server without signals
//! - SIGTERM is handled because container platforms stop instances with it

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
pub use signals::wait_for_signal;
