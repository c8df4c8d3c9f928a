//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types (validated, business-logic-ready)
//! - `wire.rs` — Raw serde structs matching indexer responses
//! - `convert.rs` — `TryFrom` conversions with validation
//! - `client.rs` — Sub-client that fetches from a `SeriesSource`

pub mod asset;
pub mod price_history;
