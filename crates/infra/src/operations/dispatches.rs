use weide_core::{BatchId, DispatchId, DomainError, DomainResult, ProductId, find_by_id, position_of};
use weide_events::ActivityKind;
use weide_sales::{Dispatch, DispatchKind, normalize_customer};

use crate::store::DairyStore;

fn require_quantity(quantity: u32) -> DomainResult<()> {
    if quantity == 0 {
        return Err(DomainError::validation("Dispatch quantity must be greater than zero"));
    }
    Ok(())
}

impl DairyStore {
    /// Sell `quantity` units out of one batch, dated today.
    ///
    /// `customer` is required for wholesale and dropped for market sales.
    /// An unknown product or batch id is `NotFound` and publishes no
    /// notification; every other rejection is reported to the user.
    pub fn add_dispatch(
        &mut self,
        product_id: ProductId,
        batch_id: BatchId,
        quantity: u32,
        kind: DispatchKind,
        customer: Option<&str>,
    ) -> DomainResult<DispatchId> {
        let Some(product) = find_by_id(&self.products, &product_id) else {
            return self.reject("add_dispatch", DomainError::not_found("Product", product_id));
        };
        let Some(batch) = find_by_id(&self.batches, &batch_id) else {
            return self.reject("add_dispatch", DomainError::not_found("Batch", batch_id));
        };
        if batch.product_id != product.id {
            let err = DomainError::validation(format!(
                "Batch {} does not belong to {}",
                batch.batch_code, product.name
            ));
            return self.reject("add_dispatch", err);
        }
        if let Err(err) = require_quantity(quantity) {
            return self.reject("add_dispatch", err);
        }
        let customer = match normalize_customer(kind, customer) {
            Ok(customer) => customer,
            Err(err) => return self.reject("add_dispatch", err),
        };
        let available = self.inventory_for(batch_id).map_or(0, |row| row.quantity);
        if available < quantity {
            let err = DomainError::InsufficientStock {
                product: product.name.clone(),
                batch_code: batch.batch_code.clone(),
                available,
                requested: quantity,
            };
            return self.reject("add_dispatch", err);
        }

        let dispatch = Dispatch::new(batch, product.name.clone(), quantity, kind, customer, self.clock().today());
        let id = dispatch.id;
        let description = format!(
            "Dispatched {quantity} units of {} to {}",
            dispatch.product_name,
            dispatch.destination()
        );
        let success = format!("Added new dispatch of {}", dispatch.product_name);

        self.adjust_stock(batch_id, -i64::from(quantity));
        self.record_mutation(-i64::from(quantity), dispatch.product_id, &dispatch.product_name);
        tracing::info!(
            dispatch_id = %id,
            batch_code = %dispatch.batch_code,
            kind = %dispatch.kind,
            quantity,
            "dispatch added"
        );
        self.dispatches.insert(0, dispatch);

        self.record_activity(ActivityKind::Dispatch, description);
        self.notify_success(success);
        Ok(id)
    }

    /// Replace a dispatch by id, moving stock by the change in quantity.
    ///
    /// The dispatch stays on its batch; product name and batch code are kept
    /// from the stored record.
    pub fn update_dispatch(&mut self, dispatch: Dispatch) -> DomainResult<()> {
        let Some(index) = position_of(&self.dispatches, &dispatch.id) else {
            return self.reject("update_dispatch", DomainError::not_found("Dispatch", dispatch.id));
        };
        let current = &self.dispatches[index];
        if dispatch.batch_id != current.batch_id || dispatch.product_id != current.product_id {
            let err = DomainError::validation("A dispatch cannot be moved to another batch");
            return self.reject("update_dispatch", err);
        }
        if let Err(err) = require_quantity(dispatch.quantity) {
            return self.reject("update_dispatch", err);
        }
        let customer = match normalize_customer(dispatch.kind, dispatch.customer.as_deref()) {
            Ok(customer) => customer,
            Err(err) => return self.reject("update_dispatch", err),
        };

        let delta = i64::from(dispatch.quantity) - i64::from(current.quantity);
        let available = self.inventory_for(current.batch_id).map_or(0, |row| row.quantity);
        if delta > 0 && i64::from(available) < delta {
            let err = DomainError::InsufficientStock {
                product: current.product_name.clone(),
                batch_code: current.batch_code.clone(),
                available,
                requested: u32::try_from(delta).unwrap_or(u32::MAX),
            };
            return self.reject("update_dispatch", err);
        }

        let updated = Dispatch {
            product_name: current.product_name.clone(),
            batch_code: current.batch_code.clone(),
            customer,
            ..dispatch
        };

        if delta != 0 {
            self.adjust_stock(updated.batch_id, -delta);
            self.record_mutation(-delta, updated.product_id, &updated.product_name);
        }

        tracing::info!(dispatch_id = %updated.id, delta, "dispatch updated");
        self.record_activity(
            ActivityKind::Edit,
            format!("Updated dispatch of {} to {}", updated.product_name, updated.destination()),
        );
        self.notify_success(format!("Updated dispatch of {}", updated.product_name));
        self.dispatches[index] = updated;
        Ok(())
    }

    /// Cancel a dispatch and return its quantity to the batch.
    pub fn delete_dispatch(&mut self, id: DispatchId) -> DomainResult<Dispatch> {
        let Some(index) = position_of(&self.dispatches, &id) else {
            return self.reject("delete_dispatch", DomainError::not_found("Dispatch", id));
        };

        let dispatch = self.dispatches.remove(index);
        let quantity = i64::from(dispatch.quantity);
        self.adjust_stock(dispatch.batch_id, quantity);
        self.record_mutation(quantity, dispatch.product_id, &dispatch.product_name);

        tracing::info!(dispatch_id = %id, quantity, "dispatch deleted");
        self.record_activity(
            ActivityKind::Delete,
            format!("Removed dispatch of {} to {}", dispatch.product_name, dispatch.destination()),
        );
        self.notify_success(format!("Deleted dispatch of {}", dispatch.product_name));
        Ok(dispatch)
    }
}
