//! Tool discovery bookkeeping and selection
//!
//! ```text
//! providers ──discover──▶ ToolRegistry ──all()──▶ relevance::rank ──▶ shortlist
//! ```

pub mod domain;
pub mod relevance;
mod registry;

pub use domain::Domain;
pub use registry::ToolRegistry;
pub use relevance::{rank, RelevanceCandidate};
