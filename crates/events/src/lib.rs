//! Activity log entries, user notifications and the pub/sub plumbing that
//! carries them.

pub mod activity;
pub mod bus;
pub mod in_memory_bus;
pub mod notification;

pub use activity::{ActivityKind, RecentActivity};
pub use bus::{EventBus, Subscription};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use notification::{Notification, Severity};
