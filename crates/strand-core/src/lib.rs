//! Strand Core
//!
//! Tool orchestration over stdio tool providers. Each provider is an external
//! process speaking line-delimited JSON-RPC 2.0; its tools are discovered at
//! start-up and free-text requests are routed to them.
//!
//! ## Pipeline
//!
//! - `adapter`: discover and call tools, one process per exchange
//! - `tools`: qualified-name registry and lexical relevance ranking
//! - `extract`: rule-based slot filling (names, places, dates, counts)
//! - `intent`: round-trip / combined / single-tool routing
//! - `orchestrator`: ties it together and keeps the conversation history
//!
//! ```rust,ignore
//! use strand_core::{ConsoleLogger, FileConfigProvider, Orchestrator};
//!
//! let config = FileConfigProvider::user();
//! let mut agent = Orchestrator::connect(&config, Arc::new(ConsoleLogger::new())).await;
//!
//! let answer = agent.process_request("Find trains from Leeds to York tomorrow").await;
//! ```

pub mod adapter;
pub mod config;
pub mod extract;
pub mod history;
pub mod intent;
pub mod logging;
pub mod orchestrator;
pub mod rpc;
pub mod tools;
pub mod types;

// Re-export commonly used types
pub use types::{ArgValue, ExtractedArguments, ParameterSchema, ParameterSlot, SlotType, ToolDescriptor};

pub use logging::{ConsoleLogger, Logger, NoOpLogger, RecordingLogger, SharedLogger};

pub use config::{ConfigProvider, FileConfigProvider, MemoryConfigProvider, ProviderConfig, Settings};

pub use adapter::{AdapterError, AdapterResult, CallOutcome, MockAdapter, MockMode, ProviderAdapter, StdioAdapter};

pub use extract::{missing_required, ParameterExtractor, SlotKind};

pub use tools::{Domain, RelevanceCandidate, ToolRegistry};

pub use intent::Intent;

pub use history::{ConversationEntry, ConversationHistory, Role, Tag};

pub use orchestrator::Orchestrator;
