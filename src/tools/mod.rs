// src/tools/mod.rs
//! The analyst's five data tools: JSON-schema definitions shown to the
//! reasoning service, typed dispatch, and the executor that runs validated
//! calls against the sentiment store.

pub mod call;
pub mod definitions;
pub mod divergence;
pub mod executor;

pub use call::{ToolCall, ToolError};
pub use definitions::{tool_specs, ToolSpec};
pub use divergence::{divergence_series, DivergenceEntry};
pub use executor::ToolExecutor;
