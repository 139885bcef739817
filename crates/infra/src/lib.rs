//! Infrastructure layer: the in-memory store, its configuration, startup
//! seeding, and the read views built on top of it.

pub mod config;
pub mod operations;
pub mod reports;
pub mod seed;
pub mod store;
pub mod views;


pub use config::{ConfigError, StoreConfig};
pub use reports::{DispatchReport, InventoryReport, ProductStock};
pub use store::{DairyStore, NotificationBus};
pub use views::Dashboard;
