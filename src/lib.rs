//! Stock Market MCP Server Library
//!
//! This crate exposes stock market data to MCP clients as six tools: quotes,
//! symbol search, price history, regional market summaries, news and company
//! fundamentals, all backed by the public Yahoo Finance endpoints.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **market**: Upstream client, entities and text rendering
//!   - **tools**: Tool definitions and the registry that dispatches calls
//!
//! # Example
//!
//! ```rust,no_run
//! use stock_mcp_server::{Config, McpServer, core::TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
