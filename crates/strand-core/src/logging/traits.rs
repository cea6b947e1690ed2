//! Logger trait definition

use std::sync::Arc;

/// Sink for orchestration progress
///
/// Every component that talks to providers takes a [`SharedLogger`] at
/// construction and tags its lines with a bracketed component name, e.g.
/// `[Orchestrator] Intent: RoundTrip` or `[ToolRegistry] Duplicate tool ...`.
///
/// Implementations:
/// - `NoOpLogger`: drops everything (`--quiet`, most tests)
/// - `RecordingLogger`: keeps every line for assertions
/// - `ConsoleLogger`: prints to the terminal
pub trait Logger: Send + Sync {
    /// Arguments, wire payloads and other per-call detail
    fn debug(&self, message: &str);

    /// Intent chosen, tool called, tools discovered
    fn info(&self, message: &str);

    /// A provider or tool was skipped, or a call failed
    fn warn(&self, message: &str);

    /// Nothing usable is left to route requests to
    fn error(&self, message: &str);
}

/// Logger handle shared by the orchestrator, registry and adapters
pub type SharedLogger = Arc<dyn Logger>;

/// `format!`-style logging through a [`Logger`]
///
/// ```rust,ignore
/// log_info!(self.logger, "[Orchestrator] Calling {} with {}", tool.qualified_name, arguments);
/// ```
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(&format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(&format!($($arg)*))
    };
}
