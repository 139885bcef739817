//! Startup sample data.
//!
//! Nothing is persisted, so every process starts from a freshly generated
//! dataset: the fixed cheese catalog plus a handful of random batches and
//! dispatches. Dispatches are booked against inventory exactly as
//! `add_dispatch` would, so the generated state satisfies the same invariants
//! as one built through the operations.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use weide_core::{Clock, SystemClock};
use weide_events::{ActivityKind, RecentActivity};
use weide_inventory::{InventoryMutation, InventoryRow, MutationKind};
use weide_production::Batch;
use weide_products::{CheeseCategory, Product};
use weide_sales::{Dispatch, DispatchKind};

use crate::config::StoreConfig;
use crate::store::DairyStore;

pub const CATALOG: [(&str, CheeseCategory); 10] = [
    ("Gouda", CheeseCategory::Cow),
    ("Cheddar", CheeseCategory::Cow),
    ("Brie", CheeseCategory::Cow),
    ("Chevre", CheeseCategory::Goat),
    ("Feta", CheeseCategory::Sheep),
    ("Blue Cheese", CheeseCategory::Cow),
    ("Manchego", CheeseCategory::Sheep),
    ("Roquefort", CheeseCategory::Sheep),
    ("Camembert", CheeseCategory::Cow),
    ("Ricotta", CheeseCategory::Cow),
];

pub const CUSTOMERS: [&str; 5] = [
    "ABC Market",
    "XYZ Wholesale",
    "Local Shop",
    "City Grocery",
    "Farmers Market",
];

const BATCH_COUNT: usize = 10;
const DISPATCH_COUNT: usize = 5;
const SEEDED_BATCH_ACTIVITIES: usize = 5;
const SEEDED_DISPATCH_ACTIVITIES: usize = 3;

impl DairyStore {
    /// Store on the system clock, seeded when `config.seed` is set.
    pub fn bootstrap(config: StoreConfig) -> Self {
        Self::bootstrap_with_clock(config, Arc::new(SystemClock))
    }

    pub fn bootstrap_with_clock(config: StoreConfig, clock: Arc<dyn Clock>) -> Self {
        let mut store = Self::with_clock(config, clock);
        if store.config.seed {
            let mut rng = match store.config.rng_seed {
                Some(value) => StdRng::seed_from_u64(value),
                None => StdRng::from_entropy(),
            };
            seed(&mut store, &mut rng);
        }
        store
    }
}

/// Replace the store's contents with a generated dataset.
pub fn seed<R: Rng>(store: &mut DairyStore, rng: &mut R) {
    let now = store.now();
    let user = store.config.user.clone();

    let products: Vec<Product> = CATALOG
        .iter()
        .map(|(name, category)| Product::new(*name, *category))
        .collect();

    let mut batches: Vec<Batch> = (0..BATCH_COUNT)
        .map(|_| {
            let product = &products[rng.gen_range(0..products.len())];
            let created_at = now - Duration::days(rng.gen_range(0..30));
            let quantity = rng.gen_range(10..60);
            Batch::new(product, quantity, created_at.date_naive(), created_at)
        })
        .collect();

    let mut inventory: Vec<InventoryRow> = batches
        .iter()
        .map(|batch| InventoryRow::for_batch(batch, batch.created_at))
        .collect();

    let mut mutations: Vec<InventoryMutation> = batches
        .iter()
        .map(|batch| {
            InventoryMutation::new(
                MutationKind::In,
                batch.product_id,
                batch.product_name.as_str(),
                batch.quantity,
                batch.created_at,
                user.as_str(),
            )
        })
        .collect();

    // `inventory[i]` mirrors `batches[i]` until both are sorted below.
    let mut dispatches: Vec<(Dispatch, DateTime<Utc>)> = Vec::with_capacity(DISPATCH_COUNT);
    for _ in 0..DISPATCH_COUNT {
        let index = rng.gen_range(0..batches.len());
        let batch = &batches[index];
        let row = &mut inventory[index];

        let quantity = row.quantity / 2;
        if quantity == 0 {
            continue;
        }
        let dispatched_at = (batch.created_at + Duration::days(rng.gen_range(1..=7))).min(now);
        let (kind, customer) = if rng.gen_bool(0.5) {
            let customer = CUSTOMERS[rng.gen_range(0..CUSTOMERS.len())];
            (DispatchKind::Wholesale, Some(customer.to_string()))
        } else {
            (DispatchKind::Market, None)
        };

        row.quantity -= quantity;
        row.last_updated = row.last_updated.max(dispatched_at);
        mutations.push(InventoryMutation::new(
            MutationKind::Out,
            batch.product_id,
            batch.product_name.as_str(),
            quantity,
            dispatched_at,
            user.as_str(),
        ));
        let dispatch = Dispatch::new(
            batch,
            batch.product_name.clone(),
            quantity,
            kind,
            customer,
            dispatched_at.date_naive(),
        );
        dispatches.push((dispatch, dispatched_at));
    }

    batches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    inventory.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
    mutations.sort_by(|a, b| b.date.cmp(&a.date));
    dispatches.sort_by(|a, b| b.1.cmp(&a.1));

    let mut activities: Vec<RecentActivity> = batches
        .iter()
        .take(SEEDED_BATCH_ACTIVITIES)
        .map(|batch| {
            RecentActivity::new(
                ActivityKind::Input,
                format!(
                    "Added {} units of {} (Batch: {})",
                    batch.quantity, batch.product_name, batch.batch_code
                ),
                batch.created_at,
                user.as_str(),
            )
        })
        .chain(dispatches.iter().take(SEEDED_DISPATCH_ACTIVITIES).map(|(dispatch, at)| {
            RecentActivity::new(
                ActivityKind::Dispatch,
                format!(
                    "Dispatched {} units of {} to {}",
                    dispatch.quantity,
                    dispatch.product_name,
                    dispatch.destination()
                ),
                *at,
                user.as_str(),
            )
        }))
        .collect();
    activities.sort_by(|a, b| b.date.cmp(&a.date));

    store.products = products;
    store.batches = batches;
    store.inventory = inventory;
    store.inventory_mutations = mutations;
    store.dispatches = dispatches.into_iter().map(|(dispatch, _)| dispatch).collect();
    store.recent_activities = activities;
    store.refresh_warnings();

    tracing::info!(
        products = store.products.len(),
        batches = store.batches.len(),
        dispatches = store.dispatches.len(),
        warnings = store.warnings.len(),
        "sample data generated"
    );
}
