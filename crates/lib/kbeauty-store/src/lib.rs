//! Catalog models and reference tables for kbeauty-mcp.
//!
//! This crate defines the brand, ingredient and routine records shared by the
//! control plane and the transports, plus the built-in catalog that is loaded
//! once at startup and never mutated afterwards.

pub mod catalog;
mod data;
pub mod models;
pub mod schema;
pub mod table;

pub use catalog::{Catalog, CatalogError};
pub use models::*;
pub use table::{Keyed, Table};
