//! Domains module containing business logic organized by bounded contexts.
//!
//! - `market`: upstream market data access, entities and text rendering
//! - `tools`: the MCP tools exposed to clients and their dispatcher

pub mod market;
pub mod tools;
