//! MCP tool modules.
//!
//! Catalog tools forward to the control plane; context tools describe the
//! server itself.

pub mod catalog;
mod context;
