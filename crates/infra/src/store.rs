//! The single state container for the whole application.
//!
//! `DairyStore` owns every collection and is the only way to change them.
//! Operations (see `operations/`) validate everything up front and only then
//! rewrite the affected collections, so a rejected call leaves the store
//! exactly as it was.
//!
//! All collections are kept newest first.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use weide_core::{BatchId, Clock, DispatchId, DomainError, DomainResult, ProductId, SystemClock, find_by_id};
use weide_events::{ActivityKind, EventBus, InMemoryEventBus, Notification, RecentActivity, Subscription};
use weide_inventory::{InventoryMutation, InventoryRow, WarningMessage, generate_warnings};
use weide_production::Batch;
use weide_products::Product;
use weide_sales::Dispatch;

use crate::config::StoreConfig;

pub type NotificationBus = InMemoryEventBus<Notification>;

pub struct DairyStore {
    pub(crate) products: Vec<Product>,
    pub(crate) batches: Vec<Batch>,
    pub(crate) inventory: Vec<InventoryRow>,
    pub(crate) inventory_mutations: Vec<InventoryMutation>,
    pub(crate) dispatches: Vec<Dispatch>,
    pub(crate) warnings: Vec<WarningMessage>,
    pub(crate) recent_activities: Vec<RecentActivity>,
    pub(crate) config: StoreConfig,
    clock: Arc<dyn Clock>,
    notifications: Arc<NotificationBus>,
}

impl core::fmt::Debug for DairyStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DairyStore")
            .field("products", &self.products.len())
            .field("batches", &self.batches.len())
            .field("inventory", &self.inventory.len())
            .field("inventory_mutations", &self.inventory_mutations.len())
            .field("dispatches", &self.dispatches.len())
            .field("warnings", &self.warnings.len())
            .field("recent_activities", &self.recent_activities.len())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for DairyStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl DairyStore {
    /// Empty store on the system clock.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Empty store on a caller-supplied clock.
    pub fn with_clock(config: StoreConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            products: Vec::new(),
            batches: Vec::new(),
            inventory: Vec::new(),
            inventory_mutations: Vec::new(),
            dispatches: Vec::new(),
            warnings: Vec::new(),
            recent_activities: Vec::new(),
            config,
            clock,
            notifications: Arc::new(NotificationBus::new()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    // ---- read access -------------------------------------------------------

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn inventory(&self) -> &[InventoryRow] {
        &self.inventory
    }

    pub fn inventory_mutations(&self) -> &[InventoryMutation] {
        &self.inventory_mutations
    }

    pub fn dispatches(&self) -> &[Dispatch] {
        &self.dispatches
    }

    pub fn warnings(&self) -> &[WarningMessage] {
        &self.warnings
    }

    pub fn recent_activities(&self) -> &[RecentActivity] {
        &self.recent_activities
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        find_by_id(&self.products, &id)
    }

    pub fn batch(&self, id: BatchId) -> Option<&Batch> {
        find_by_id(&self.batches, &id)
    }

    pub fn dispatch(&self, id: DispatchId) -> Option<&Dispatch> {
        find_by_id(&self.dispatches, &id)
    }

    /// Inventory row of a batch.
    pub fn inventory_for(&self, batch_id: BatchId) -> Option<&InventoryRow> {
        find_by_id(&self.inventory, &batch_id)
    }

    // ---- notifications -----------------------------------------------------

    /// Receive every notification published from now on.
    pub fn subscribe_notifications(&self) -> Subscription<Notification> {
        self.notifications.subscribe()
    }

    pub fn notification_bus(&self) -> Arc<NotificationBus> {
        Arc::clone(&self.notifications)
    }

    pub(crate) fn notify_success(&self, message: impl Into<String>) {
        self.publish(Notification::success(message, self.now()));
    }

    fn publish(&self, notification: Notification) {
        if let Err(err) = self.notifications.publish(notification) {
            tracing::error!(?err, "failed to publish notification");
        }
    }

    /// Log a rejected operation, surface it to the user unless it is one of
    /// the silent kinds, and hand the error back.
    pub(crate) fn reject<T>(&self, operation: &'static str, err: DomainError) -> DomainResult<T> {
        if err.is_silent() {
            tracing::debug!(operation, error = %err, "operation ignored");
        } else {
            tracing::warn!(operation, error = %err, "operation rejected");
            self.publish(Notification::error(err.to_string(), self.now()));
        }
        Err(err)
    }

    // ---- shared bookkeeping ------------------------------------------------

    pub(crate) fn record_activity(&mut self, kind: ActivityKind, description: impl Into<String>) {
        let activity = RecentActivity::new(kind, description, self.now(), self.config.user.clone());
        self.recent_activities.insert(0, activity);
    }

    /// Append a ledger entry for a signed stock change.
    pub(crate) fn record_mutation(&mut self, delta: i64, product_id: ProductId, product_name: &str) {
        let mutation =
            InventoryMutation::for_delta(delta, product_id, product_name, self.now(), self.config.user.clone());
        self.inventory_mutations.insert(0, mutation);
    }

    pub(crate) fn inventory_row_mut(&mut self, batch_id: BatchId) -> Option<&mut InventoryRow> {
        self.inventory.iter_mut().find(|row| row.batch_id == batch_id)
    }

    /// Shift a batch's remaining stock by `delta`. Callers check bounds first.
    pub(crate) fn adjust_stock(&mut self, batch_id: BatchId, delta: i64) {
        let now = self.now();
        if let Some(row) = self.inventory_row_mut(batch_id) {
            let next = i64::from(row.quantity) + delta;
            row.quantity = u32::try_from(next.max(0)).unwrap_or(u32::MAX);
            row.last_updated = now;
        }
    }

    // ---- warnings ----------------------------------------------------------

    /// Recompute the warning list from current stock.
    ///
    /// Warnings are otherwise a snapshot taken at startup; nothing calls this
    /// implicitly.
    pub fn refresh_warnings(&mut self) -> usize {
        self.warnings = generate_warnings(
            &self.inventory,
            &self.batches,
            &self.config.warning_policy,
            self.now(),
        );
        tracing::info!(count = self.warnings.len(), "warnings recomputed");
        self.warnings.len()
    }
}
