//! Core data types shared across the orchestrator

mod arguments;
mod tool;

pub use arguments::{ArgValue, ExtractedArguments};
pub use tool::{qualify, ParameterSchema, ParameterSlot, SlotType, ToolDescriptor};
