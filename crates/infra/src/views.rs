//! Read-only projections over the store used by the presentation layer.

use serde::Serialize;

use weide_events::RecentActivity;
use weide_inventory::{InventoryRow, WarningKind, WarningMessage};
use weide_production::Batch;
use weide_products::Product;

use crate::store::DairyStore;

pub const DASHBOARD_ACTIVITIES: usize = 5;
pub const DASHBOARD_BATCHES: usize = 5;

/// Landing-page summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard<'a> {
    pub critical_warnings: Vec<&'a WarningMessage>,
    pub latest_activities: &'a [RecentActivity],
    pub latest_batches: &'a [Batch],
    pub product_count: usize,
    pub total_stock: u64,
}

impl DairyStore {
    pub fn dashboard(&self) -> Dashboard<'_> {
        let activities = &self.recent_activities;
        let batches = &self.batches;
        Dashboard {
            critical_warnings: self
                .warnings
                .iter()
                .filter(|w| w.kind == WarningKind::Critical)
                .collect(),
            latest_activities: &activities[..activities.len().min(DASHBOARD_ACTIVITIES)],
            latest_batches: &batches[..batches.len().min(DASHBOARD_BATCHES)],
            product_count: self.products.len(),
            total_stock: self.inventory.iter().map(|row| u64::from(row.quantity)).sum(),
        }
    }

    /// Products whose name or category contains `term`. A blank term
    /// matches everything.
    pub fn search_products(&self, term: &str) -> Vec<&Product> {
        let term = term.trim();
        self.products
            .iter()
            .filter(|p| term.is_empty() || p.matches(term))
            .collect()
    }

    /// Inventory rows whose product, category or batch code contains `term`.
    pub fn search_inventory(&self, term: &str) -> Vec<&InventoryRow> {
        let term = term.trim();
        self.inventory
            .iter()
            .filter(|row| term.is_empty() || row.matches(term))
            .collect()
    }

    /// Rows strictly below `min_level`.
    pub fn low_stock(&self, min_level: u32) -> Vec<&InventoryRow> {
        self.inventory.iter().filter(|row| row.is_low(min_level)).collect()
    }
}

#[cfg(test)]
mod tests {
    use weide_products::CheeseCategory;
    use weide_sales::DispatchKind;

    use crate::config::StoreConfig;
    use crate::store::DairyStore;

    #[test]
    fn search_is_case_insensitive_and_blank_matches_all() {
        let mut store = DairyStore::new(StoreConfig::default());
        store.add_product("Blue Cheese", CheeseCategory::Cow).unwrap();
        store.add_product("Chevre", CheeseCategory::Goat).unwrap();

        assert_eq!(store.search_products("BLUE").len(), 1);
        assert_eq!(store.search_products("goat")[0].name, "Chevre");
        assert_eq!(store.search_products("  ").len(), 2);
    }

    #[test]
    fn low_stock_uses_given_level() {
        let mut store = DairyStore::new(StoreConfig::default());
        let pid = store.add_product("Feta", CheeseCategory::Sheep).unwrap();
        let low = store.add_batch(pid, 8, None).unwrap();
        let high = store.add_batch(pid, 40, None).unwrap();
        store.add_dispatch(pid, high, 35, DispatchKind::Market, None).unwrap();

        let ids: Vec<_> = store.low_stock(10).iter().map(|r| r.batch_id).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&low) && ids.contains(&high));
        assert!(store.low_stock(5).is_empty());
    }

    #[test]
    fn dashboard_caps_lists() {
        let mut store = DairyStore::new(StoreConfig::default());
        let pid = store.add_product("Gouda", CheeseCategory::Cow).unwrap();
        for qty in 1..=7 {
            store.add_batch(pid, qty * 10, None).unwrap();
        }

        let dashboard = store.dashboard();
        assert_eq!(dashboard.latest_batches.len(), super::DASHBOARD_BATCHES);
        assert_eq!(dashboard.latest_activities.len(), super::DASHBOARD_ACTIVITIES);
        assert_eq!(dashboard.latest_batches[0].quantity, 70);
        assert_eq!(dashboard.total_stock, 280);

        let json = serde_json::to_value(&dashboard).unwrap();
        assert!(json.get("criticalWarnings").is_some());
    }
}
