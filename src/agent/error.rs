// src/agent/error.rs
//! Failure modes of an exchange. Tool-level problems (unknown tool, schema
//! violation, store error) are not here: those become error payloads the
//! model reads. These are the faults that end the exchange itself.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    /// The reasoning service was unreachable or answered with garbage.
    #[error("reasoning service error: {0}")]
    Reasoning(#[from] anyhow::Error),

    /// The model emitted an arguments string that is not valid JSON. The
    /// transcript is corrupt at that point, so the exchange stops.
    #[error("malformed arguments for tool {name}: {source}")]
    BadToolArguments {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}
