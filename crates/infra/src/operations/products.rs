use weide_core::{DomainError, DomainResult, ProductId, position_of};
use weide_events::ActivityKind;
use weide_products::{CheeseCategory, Product, normalize_name, parse_import_lines};

use crate::store::DairyStore;

impl DairyStore {
    /// Add a catalog entry. The name is trimmed and must not be blank.
    pub fn add_product(&mut self, name: &str, category: CheeseCategory) -> DomainResult<ProductId> {
        let name = match normalize_name(name) {
            Ok(name) => name,
            Err(err) => return self.reject("add_product", err),
        };

        let product = Product::new(name.clone(), category);
        let id = product.id;
        self.products.insert(0, product);

        tracing::info!(product_id = %id, %name, %category, "product added");
        self.record_activity(ActivityKind::Edit, format!("Added new product: {name}"));
        self.notify_success(format!("Added new product: {name}"));
        Ok(id)
    }

    /// Replace a product by id.
    ///
    /// When the name changes, the new name and category are copied into every
    /// batch and inventory row of the product, and the new name into its
    /// ledger entries and dispatches. A change of category alone is stored on
    /// the product only.
    pub fn update_product(&mut self, product: Product) -> DomainResult<()> {
        let name = match normalize_name(&product.name) {
            Ok(name) => name,
            Err(err) => return self.reject("update_product", err),
        };
        let Some(index) = position_of(&self.products, &product.id) else {
            return self.reject("update_product", DomainError::not_found("Product", product.id));
        };

        let updated = Product { name, ..product };
        let old_name = core::mem::replace(&mut self.products[index], updated.clone()).name;

        if old_name == updated.name {
            tracing::debug!(product_id = %updated.id, "product updated without rename");
            return Ok(());
        }

        self.cascade_product(&updated);

        tracing::info!(product_id = %updated.id, from = %old_name, to = %updated.name, "product renamed");
        self.record_activity(
            ActivityKind::Edit,
            format!("Updated product: {old_name} → {}", updated.name),
        );
        self.notify_success(format!("Updated product: {}", updated.name));
        Ok(())
    }

    fn cascade_product(&mut self, product: &Product) {
        for batch in self.batches.iter_mut().filter(|b| b.product_id == product.id) {
            batch.product_name.clone_from(&product.name);
            batch.category = product.category;
        }
        for row in self.inventory.iter_mut().filter(|r| r.product_id == product.id) {
            row.product_name.clone_from(&product.name);
            row.category = product.category;
        }
        for mutation in self.inventory_mutations.iter_mut().filter(|m| m.product_id == product.id) {
            mutation.product_name.clone_from(&product.name);
        }
        for dispatch in self.dispatches.iter_mut().filter(|d| d.product_id == product.id) {
            dispatch.product_name.clone_from(&product.name);
        }
    }

    /// Remove a product that no batch refers to.
    pub fn delete_product(&mut self, id: ProductId) -> DomainResult<Product> {
        let Some(index) = position_of(&self.products, &id) else {
            return self.reject("delete_product", DomainError::not_found("Product", id));
        };
        if self.batches.iter().any(|b| b.product_id == id) {
            let name = &self.products[index].name;
            let err = DomainError::in_use(format!("Cannot delete {name} as it is used in batches"));
            return self.reject("delete_product", err);
        }

        let product = self.products.remove(index);

        tracing::info!(product_id = %id, name = %product.name, "product deleted");
        self.record_activity(ActivityKind::Delete, format!("Removed product: {}", product.name));
        self.notify_success(format!("Deleted product: {}", product.name));
        Ok(product)
    }

    /// Bulk import: one `Cow` product per non-blank line of `text`.
    ///
    /// Every line goes through `add_product`, so each one is logged and
    /// notified individually before the summary.
    pub fn import_products(&mut self, text: &str) -> DomainResult<usize> {
        let names = parse_import_lines(text);
        if names.is_empty() {
            return self.reject("import_products", DomainError::validation("No CSV content to import"));
        }

        let mut imported = 0;
        for name in &names {
            if self.add_product(name, CheeseCategory::Cow).is_ok() {
                imported += 1;
            }
        }

        tracing::info!(imported, "products imported");
        self.notify_success(format!("Imported {imported} products"));
        Ok(imported)
    }
}
