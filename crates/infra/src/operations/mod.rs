//! Mutating operations on `DairyStore`, one module per aggregate.
//!
//! Each operation runs in two phases: every check first, then the writes.
//! A check failure goes through `DairyStore::reject`, so nothing has been
//! touched when an error is returned.

mod batches;
mod dispatches;
mod products;
