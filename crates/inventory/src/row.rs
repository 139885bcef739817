use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use weide_core::{BatchId, Entity, ProductId};
use weide_production::Batch;
use weide_products::CheeseCategory;

/// Remaining stock of one batch.
///
/// Exactly one row exists per live batch; `quantity` is the batch quantity
/// minus everything dispatched from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    pub product_id: ProductId,
    pub product_name: String,
    pub category: CheeseCategory,
    pub batch_id: BatchId,
    pub batch_code: String,
    pub quantity: u32,
    pub last_updated: DateTime<Utc>,
}

impl InventoryRow {
    /// Fresh row mirroring a newly produced batch.
    pub fn for_batch(batch: &Batch, at: DateTime<Utc>) -> Self {
        Self {
            product_id: batch.product_id,
            product_name: batch.product_name.clone(),
            category: batch.category,
            batch_id: batch.id,
            batch_code: batch.batch_code.clone(),
            quantity: batch.quantity,
            last_updated: at,
        }
    }

    /// Stock below the configured minimum level.
    pub fn is_low(&self, min_level: u32) -> bool {
        self.quantity < min_level
    }

    /// Case-insensitive substring match on product name, category or batch code.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.product_name.to_lowercase().contains(&term)
            || self.category.as_str().to_lowercase().contains(&term)
            || self.batch_code.to_lowercase().contains(&term)
    }
}

impl Entity for InventoryRow {
    type Id = BatchId;

    fn id(&self) -> &Self::Id {
        &self.batch_id
    }
}
