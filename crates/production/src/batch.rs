use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use weide_core::{BatchId, Entity, ProductId};
use weide_products::{CheeseCategory, Product};

/// Display label for a batch made on `date`: `YYMM-W`, where W is the week of
/// the month (`ceil(day / 7)`, so 1..=5).
///
/// Batches made in the same week share a code; it is not a key.
pub fn batch_code(date: NaiveDate) -> String {
    let week = date.day().div_ceil(7);
    format!("{:02}{:02}-{}", date.year().rem_euclid(100), date.month(), week)
}

/// A production run of one product.
///
/// `product_name` and `category` are copied from the product when the batch is
/// created and re-synced when the product is renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: BatchId,
    pub batch_code: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub category: CheeseCategory,
    pub quantity: u32,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Batch {
    pub fn new(product: &Product, quantity: u32, date: NaiveDate, created_at: DateTime<Utc>) -> Self {
        Self {
            id: BatchId::new(),
            batch_code: batch_code(date),
            product_id: product.id,
            product_name: product.name.clone(),
            category: product.category,
            quantity,
            date,
            created_at,
        }
    }
}

impl Entity for Batch {
    type Id = BatchId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn code_uses_week_of_month() {
        assert_eq!(batch_code(date(2024, 1, 10)), "2401-2");
        assert_eq!(batch_code(date(2024, 1, 1)), "2401-1");
        assert_eq!(batch_code(date(2024, 1, 7)), "2401-1");
        assert_eq!(batch_code(date(2024, 1, 8)), "2401-2");
        assert_eq!(batch_code(date(2023, 12, 31)), "2312-5");
    }

    #[test]
    fn code_pads_year_and_month() {
        assert_eq!(batch_code(date(2005, 3, 15)), "0503-3");
    }

    #[test]
    fn new_batch_copies_product_fields() {
        let product = Product::new("Feta", CheeseCategory::Sheep);
        let batch = Batch::new(&product, 40, date(2024, 5, 29), Utc::now());
        assert_eq!(batch.product_id, product.id);
        assert_eq!(batch.product_name, "Feta");
        assert_eq!(batch.category, CheeseCategory::Sheep);
        assert_eq!(batch.batch_code, "2405-5");
    }

    proptest! {
        #[test]
        fn week_is_always_between_one_and_five(days in 0i64..20_000) {
            let d = date(1990, 1, 1) + chrono::Duration::days(days);
            let code = batch_code(d);
            let week: u32 = code.rsplit('-').next().unwrap().parse().unwrap();
            prop_assert!((1..=5).contains(&week));
            prop_assert_eq!(code.len(), 6);
        }
    }
}
