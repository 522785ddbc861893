// src/agent/mod.rs
//! The conversational policy analyst: a bounded tool-calling loop over an
//! OpenAI-compatible provider, grounded in the sentiment store.

pub mod controller;
pub mod conversation;
pub mod error;
pub mod prompt;

pub use controller::{AgentContext, AgentReply, MAX_ITERATIONS};
pub use conversation::{
    ConversationMessage, FunctionCall, HistoryMessage, Role, ToolCallRequest, ToolCallTrace,
};
pub use error::AgentError;
pub use prompt::SYSTEM_PROMPT;
