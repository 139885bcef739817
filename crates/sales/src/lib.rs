//! Sales domain module: dispatches of stock to the market or to wholesale
//! customers.

pub mod dispatch;

pub use dispatch::{Dispatch, DispatchKind, normalize_customer};
