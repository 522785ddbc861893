// src/lib.rs

pub mod agent;
pub mod config;
pub mod llm;
pub mod server;
pub mod store;
pub mod tools;
