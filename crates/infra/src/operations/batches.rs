use chrono::NaiveDate;

use weide_core::{BatchId, DomainError, DomainResult, ProductId, find_by_id, position_of};
use weide_events::ActivityKind;
use weide_inventory::InventoryRow;
use weide_production::{Batch, batch_code};

use crate::store::DairyStore;

fn require_quantity(quantity: u32) -> DomainResult<()> {
    if quantity == 0 {
        return Err(DomainError::validation("Batch quantity must be greater than zero"));
    }
    Ok(())
}

impl DairyStore {
    /// Record a production run and put its whole quantity into stock.
    ///
    /// `date` defaults to today.
    pub fn add_batch(&mut self, product_id: ProductId, quantity: u32, date: Option<NaiveDate>) -> DomainResult<BatchId> {
        let Some(product) = find_by_id(&self.products, &product_id).cloned() else {
            return self.reject("add_batch", DomainError::not_found("Product", product_id));
        };
        if let Err(err) = require_quantity(quantity) {
            return self.reject("add_batch", err);
        }

        let now = self.now();
        let date = date.unwrap_or_else(|| self.clock().today());
        let batch = Batch::new(&product, quantity, date, now);
        let id = batch.id;
        let code = batch.batch_code.clone();

        self.inventory.insert(0, InventoryRow::for_batch(&batch, now));
        self.batches.insert(0, batch);
        self.record_mutation(i64::from(quantity), product.id, &product.name);

        tracing::info!(batch_id = %id, batch_code = %code, product = %product.name, quantity, "batch added");
        self.record_activity(
            ActivityKind::Input,
            format!("Added {quantity} units of {} (Batch: {code})", product.name),
        );
        self.notify_success(format!("Added new batch of {}", product.name));
        Ok(id)
    }

    /// Replace a batch by id.
    ///
    /// The inventory row moves by the change in batch quantity, so stock that
    /// was already dispatched stays accounted for. The batch code follows the
    /// date. The caller's `product_name`, `category`, `batch_code` and
    /// `created_at` are ignored: name and category only change through
    /// `update_product`.
    pub fn update_batch(&mut self, batch: Batch) -> DomainResult<()> {
        let Some(index) = position_of(&self.batches, &batch.id) else {
            return self.reject("update_batch", DomainError::not_found("Batch", batch.id));
        };
        let current = &self.batches[index];
        if batch.product_id != current.product_id {
            let err = DomainError::validation("A batch cannot be moved to another product");
            return self.reject("update_batch", err);
        }
        if let Err(err) = require_quantity(batch.quantity) {
            return self.reject("update_batch", err);
        }

        let delta = i64::from(batch.quantity) - i64::from(current.quantity);
        let available = self.inventory_for(batch.id).map_or(0, |row| row.quantity);
        if i64::from(available) + delta < 0 {
            let err = DomainError::InsufficientStock {
                product: current.product_name.clone(),
                batch_code: current.batch_code.clone(),
                available,
                requested: u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX),
            };
            return self.reject("update_batch", err);
        }

        let updated = Batch {
            batch_code: batch_code(batch.date),
            product_name: current.product_name.clone(),
            category: current.category,
            created_at: current.created_at,
            ..batch
        };
        let now = self.now();

        self.adjust_stock(updated.id, delta);
        if let Some(row) = self.inventory_row_mut(updated.id) {
            row.product_name.clone_from(&updated.product_name);
            row.category = updated.category;
            row.batch_code.clone_from(&updated.batch_code);
            row.last_updated = now;
        }
        if delta != 0 {
            self.record_mutation(delta, updated.product_id, &updated.product_name);
        }

        tracing::info!(batch_id = %updated.id, batch_code = %updated.batch_code, delta, "batch updated");
        self.record_activity(
            ActivityKind::Edit,
            format!("Updated batch {} of {}", updated.batch_code, updated.product_name),
        );
        self.notify_success(format!("Updated batch {}", updated.batch_code));
        self.batches[index] = updated;
        Ok(())
    }

    /// Remove a batch that no dispatch refers to, taking its stock with it.
    pub fn delete_batch(&mut self, id: BatchId) -> DomainResult<Batch> {
        let Some(index) = position_of(&self.batches, &id) else {
            return self.reject("delete_batch", DomainError::not_found("Batch", id));
        };
        if self.dispatches.iter().any(|d| d.batch_id == id) {
            let code = &self.batches[index].batch_code;
            let err = DomainError::in_use(format!("Cannot delete batch {code} as it is used in dispatches"));
            return self.reject("delete_batch", err);
        }

        let batch = self.batches.remove(index);
        self.inventory.retain(|row| row.batch_id != id);
        self.record_mutation(-i64::from(batch.quantity), batch.product_id, &batch.product_name);

        tracing::info!(batch_id = %id, batch_code = %batch.batch_code, "batch deleted");
        self.record_activity(
            ActivityKind::Delete,
            format!("Removed batch {} of {}", batch.batch_code, batch.product_name),
        );
        self.notify_success(format!("Deleted batch {}", batch.batch_code));
        Ok(batch)
    }
}
