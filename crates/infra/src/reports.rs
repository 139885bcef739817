//! Stock and sales reports.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use weide_core::{DomainError, DomainResult, ProductId};
use weide_products::CheeseCategory;
use weide_sales::{Dispatch, DispatchKind};

use crate::store::DairyStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStock {
    pub product_id: ProductId,
    pub product_name: String,
    pub category: CheeseCategory,
    pub total_quantity: u64,
    pub batch_count: usize,
}

/// Remaining stock per catalog product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub generated_at: DateTime<Utc>,
    pub products: Vec<ProductStock>,
    pub total_quantity: u64,
}

/// Dispatches dated within `from..=to`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport<'a> {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub dispatches: Vec<&'a Dispatch>,
    pub market_quantity: u64,
    pub wholesale_quantity: u64,
    pub total_quantity: u64,
}

impl DairyStore {
    pub fn inventory_report(&self) -> InventoryReport {
        let products: Vec<ProductStock> = self
            .products
            .iter()
            .map(|product| {
                let rows = self.inventory.iter().filter(|row| row.product_id == product.id);
                let (total_quantity, batch_count) =
                    rows.fold((0u64, 0usize), |(sum, n), row| (sum + u64::from(row.quantity), n + 1));
                ProductStock {
                    product_id: product.id,
                    product_name: product.name.clone(),
                    category: product.category,
                    total_quantity,
                    batch_count,
                }
            })
            .collect();

        InventoryReport {
            generated_at: self.now(),
            total_quantity: products.iter().map(|p| p.total_quantity).sum(),
            products,
        }
    }

    pub fn dispatch_report(&self, from: NaiveDate, to: NaiveDate) -> DomainResult<DispatchReport<'_>> {
        if from > to {
            return Err(DomainError::validation("Report start date must not be after end date"));
        }

        let dispatches: Vec<&Dispatch> = self
            .dispatches
            .iter()
            .filter(|d| (from..=to).contains(&d.date))
            .collect();
        let quantity_of = |kind: DispatchKind| -> u64 {
            dispatches
                .iter()
                .filter(|d| d.kind == kind)
                .map(|d| u64::from(d.quantity))
                .sum()
        };
        let market_quantity = quantity_of(DispatchKind::Market);
        let wholesale_quantity = quantity_of(DispatchKind::Wholesale);

        Ok(DispatchReport {
            from,
            to,
            dispatches,
            market_quantity,
            wholesale_quantity,
            total_quantity: market_quantity + wholesale_quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone};
    use weide_core::FixedClock;

    use super::*;
    use crate::config::StoreConfig;

    #[test]
    fn inventory_report_sums_rows_per_product() {
        let mut store = DairyStore::new(StoreConfig::default());
        let gouda = store.add_product("Gouda", CheeseCategory::Cow).unwrap();
        store.add_product("Brie", CheeseCategory::Cow).unwrap();
        store.add_batch(gouda, 10, None).unwrap();
        store.add_batch(gouda, 15, None).unwrap();

        let report = store.inventory_report();
        let gouda_stock = report.products.iter().find(|p| p.product_id == gouda).unwrap();
        assert_eq!((gouda_stock.total_quantity, gouda_stock.batch_count), (25, 2));
        assert_eq!(report.total_quantity, 25);
        assert_eq!(report.products.len(), 2);
    }

    #[test]
    fn dispatch_report_filters_by_date_and_splits_kinds() {
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap()));
        let mut store = DairyStore::with_clock(StoreConfig::default(), clock.clone());
        let pid = store.add_product("Feta", CheeseCategory::Sheep).unwrap();
        let bid = store.add_batch(pid, 100, None).unwrap();

        store.add_dispatch(pid, bid, 10, DispatchKind::Market, None).unwrap();
        clock.advance(Duration::days(3));
        store
            .add_dispatch(pid, bid, 20, DispatchKind::Wholesale, Some("Local Shop"))
            .unwrap();
        clock.advance(Duration::days(10));
        store.add_dispatch(pid, bid, 5, DispatchKind::Market, None).unwrap();

        let from = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 4, 4).unwrap();
        let report = store.dispatch_report(from, to).unwrap();
        assert_eq!(report.dispatches.len(), 2);
        assert_eq!(report.market_quantity, 10);
        assert_eq!(report.wholesale_quantity, 20);
        assert_eq!(report.total_quantity, 30);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let store = DairyStore::new(StoreConfig::default());
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert!(store.dispatch_report(day, day - Duration::days(1)).is_err());
    }
}
