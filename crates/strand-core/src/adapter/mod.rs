//! Provider adapters
//!
//! A [`ProviderAdapter`] discovers a provider's tools and invokes them. The
//! orchestrator only sees this trait; [`StdioAdapter`] is the production
//! implementation and [`MockAdapter`] serves tests and demos.

mod error;
mod mock;
mod stdio;
mod traits;

pub use error::{AdapterError, AdapterResult};
pub use mock::{MockAdapter, MockMode, RecordedCall};
pub use stdio::StdioAdapter;
pub use traits::{CallOutcome, ProviderAdapter};
