//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are the callable operations MCP clients invoke to query market data.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Static tool catalog and the call dispatcher
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/market/` (e.g., `my_tool.rs`)
//! 2. Define params, `execute()`, `invoke()`, `to_tool()` and `ENTRY`
//! 3. Export it in `definitions/market/mod.rs`
//! 4. Add its `ENTRY` to the catalog in `registry.rs`
//!
//! Both `tools/list` and `tools/call` are driven by the catalog, on every transport.

pub mod definitions;
mod error;
mod registry;

pub use error::ToolError;
pub use registry::{ToolEntry, ToolRegistry};
