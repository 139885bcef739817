//! Advisory notices for the dashboard.
//!
//! Heuristics:
//! - Summed stock per product below `low_stock_threshold` -> `Critical`.
//! - A batch with stock left that was made more than `expiry_after_days` ago
//!   -> `Warning`.
//!
//! Only products that have at least one inventory row are considered for the
//! low-stock check.

use chrono::{DateTime, Days, Utc};
use serde::{Deserialize, Serialize};

use weide_core::{Entity, ProductId, WarningId, find_by_id};
use weide_production::Batch;

use crate::row::InventoryRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningMessage {
    pub id: WarningId,
    #[serde(rename = "type")]
    pub kind: WarningKind,
    pub message: String,
    pub date: DateTime<Utc>,
}

impl WarningMessage {
    pub fn new(kind: WarningKind, message: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: WarningId::new(),
            kind,
            message: message.into(),
            date,
        }
    }
}

impl Entity for WarningMessage {
    type Id = WarningId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Thresholds for the warning heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarningPolicy {
    pub low_stock_threshold: u32,
    pub expiry_after_days: u32,
}

impl Default for WarningPolicy {
    fn default() -> Self {
        Self {
            low_stock_threshold: 20,
            expiry_after_days: 21,
        }
    }
}

/// Build the warning list from the current inventory.
///
/// Low-stock warnings come first, in order of each product's first inventory
/// row; expiry warnings follow in row order.
pub fn generate_warnings(
    rows: &[InventoryRow],
    batches: &[Batch],
    policy: &WarningPolicy,
    now: DateTime<Utc>,
) -> Vec<WarningMessage> {
    let mut totals: Vec<(ProductId, &str, u64)> = Vec::new();
    for row in rows {
        match totals.iter_mut().find(|(id, _, _)| *id == row.product_id) {
            Some(entry) => entry.2 += u64::from(row.quantity),
            None => totals.push((row.product_id, &row.product_name, u64::from(row.quantity))),
        }
    }

    let mut warnings: Vec<WarningMessage> = totals
        .into_iter()
        .filter(|(_, _, total)| *total < u64::from(policy.low_stock_threshold))
        .map(|(_, name, total)| {
            WarningMessage::new(
                WarningKind::Critical,
                format!("Low inventory for {name}: {total} units left"),
                now,
            )
        })
        .collect();

    // A cutoff before the calendar's start means no batch can be that old.
    let Some(cutoff) = now
        .date_naive()
        .checked_sub_days(Days::new(u64::from(policy.expiry_after_days)))
    else {
        return warnings;
    };
    for row in rows.iter().filter(|r| r.quantity > 0) {
        let Some(batch) = find_by_id(batches, &row.batch_id) else {
            continue;
        };
        if batch.date < cutoff {
            warnings.push(WarningMessage::new(
                WarningKind::Warning,
                format!("Batch {} is approaching expiry date", batch.batch_code),
                now,
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use weide_products::{CheeseCategory, Product};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    fn stock(product: &Product, qty: u32, made: NaiveDate) -> (Batch, InventoryRow) {
        let batch = Batch::new(product, qty, made, now());
        let row = InventoryRow::for_batch(&batch, now());
        (batch, row)
    }

    #[test]
    fn flags_products_whose_total_is_below_threshold() {
        let gouda = Product::new("Gouda", CheeseCategory::Cow);
        let feta = Product::new("Feta", CheeseCategory::Sheep);
        let recent = NaiveDate::from_ymd_opt(2024, 6, 25).unwrap();

        let (b1, r1) = stock(&gouda, 8, recent);
        let (b2, r2) = stock(&gouda, 9, recent);
        let (b3, r3) = stock(&feta, 30, recent);

        let warnings = generate_warnings(&[r1, r2, r3], &[b1, b2, b3], &WarningPolicy::default(), now());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::Critical);
        assert_eq!(warnings[0].message, "Low inventory for Gouda: 17 units left");
    }

    #[test]
    fn threshold_is_exclusive() {
        let brie = Product::new("Brie", CheeseCategory::Cow);
        let (b, r) = stock(&brie, 20, NaiveDate::from_ymd_opt(2024, 6, 29).unwrap());
        assert!(generate_warnings(&[r], &[b], &WarningPolicy::default(), now()).is_empty());
    }

    #[test]
    fn old_batches_with_stock_get_expiry_warning() {
        let chevre = Product::new("Chevre", CheeseCategory::Goat);
        let (b, r) = stock(&chevre, 50, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

        let warnings = generate_warnings(&[r.clone()], &[b.clone()], &WarningPolicy::default(), now());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::Warning);
        assert_eq!(warnings[0].message, "Batch 2406-1 is approaching expiry date");

        let mut empty = r;
        empty.quantity = 0;
        let warnings = generate_warnings(&[empty], &[b], &WarningPolicy::default(), now());
        // Sold out: no expiry notice, but it is now critically low.
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::Critical);
    }

    #[test]
    fn huge_expiry_window_never_flags_batches() {
        let gouda = Product::new("Gouda", CheeseCategory::Cow);
        let (b, r) = stock(&gouda, 50, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        let policy = WarningPolicy {
            expiry_after_days: u32::MAX,
            ..WarningPolicy::default()
        };
        assert!(generate_warnings(&[r], &[b], &policy, now()).is_empty());
    }
}
