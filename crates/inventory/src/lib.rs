//! Inventory domain module.
//!
//! Per-batch stock rows, the append-only movement ledger, and the warning
//! heuristics computed from stock levels.

pub mod mutation;
pub mod row;
pub mod warning;

pub use mutation::{InventoryMutation, MutationKind};
pub use row::InventoryRow;
pub use warning::{WarningKind, WarningMessage, WarningPolicy, generate_warnings};
