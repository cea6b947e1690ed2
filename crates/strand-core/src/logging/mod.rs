//! Logging abstractions for runtime-agnostic logging
//!
//! The orchestrator and adapters log through an injected [`Logger`]; the
//! stdio transport additionally writes wire-level traces through
//! [`file_logger`] when `STRAND_DEBUG` is set.

mod traits;
mod noop;
mod console;
pub mod file_logger;

pub use traits::{Logger, SharedLogger};
pub use noop::{NoOpLogger, RecordingLogger};
pub use console::ConsoleLogger;

pub use file_logger::{log_file_path, LogLevel};
