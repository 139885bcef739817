//! Production domain module: batches of cheese made on a given day.

pub mod batch;

pub use batch::{Batch, batch_code};
