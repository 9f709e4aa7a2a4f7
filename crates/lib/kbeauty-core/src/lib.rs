//! Core services for kbeauty-mcp.
//!
//! This crate resolves free-text queries against the catalog, renders the
//! matched records as text, dispatches named tool calls, and optionally
//! enriches responses with results from a web search collaborator.

pub mod control;
pub mod dispatch;
pub mod format;
pub mod normalize;
pub mod search;

pub use control::{ControlError, KBeautyControlPlane, SearchPolicy};
pub use dispatch::{DispatchError, ToolCall, ToolName};
