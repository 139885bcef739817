use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use weide_core::{BatchId, DispatchId, DomainError, Entity, ProductId};
use weide_production::Batch;

/// Sales channel of a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispatchKind {
    Market,
    Wholesale,
}

impl DispatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchKind::Market => "Market",
            DispatchKind::Wholesale => "Wholesale",
        }
    }
}

impl core::fmt::Display for DispatchKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the customer field for a dispatch of `kind`.
///
/// Market dispatches never carry a customer; wholesale ones must name one.
pub fn normalize_customer(kind: DispatchKind, customer: Option<&str>) -> Result<Option<String>, DomainError> {
    match kind {
        DispatchKind::Market => Ok(None),
        DispatchKind::Wholesale => match customer.map(str::trim) {
            Some(name) if !name.is_empty() => Ok(Some(name.to_string())),
            _ => Err(DomainError::validation("Wholesale dispatch requires a customer")),
        },
    }
}

/// Outbound sale of stock from one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dispatch {
    pub id: DispatchId,
    pub date: NaiveDate,
    pub product_id: ProductId,
    pub product_name: String,
    pub batch_id: BatchId,
    pub batch_code: String,
    pub quantity: u32,
    #[serde(rename = "type")]
    pub kind: DispatchKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
}

impl Dispatch {
    /// New dispatch from `batch`. `customer` must already be normalized.
    pub fn new(
        batch: &Batch,
        product_name: impl Into<String>,
        quantity: u32,
        kind: DispatchKind,
        customer: Option<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: DispatchId::new(),
            date,
            product_id: batch.product_id,
            product_name: product_name.into(),
            batch_id: batch.id,
            batch_code: batch.batch_code.clone(),
            quantity,
            kind,
            customer,
        }
    }

    /// Where the goods went: the customer for wholesale, otherwise "Market".
    pub fn destination(&self) -> &str {
        match (self.kind, self.customer.as_deref()) {
            (DispatchKind::Wholesale, Some(customer)) => customer,
            (kind, _) => kind.as_str(),
        }
    }
}

impl Entity for Dispatch {
    type Id = DispatchId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use weide_products::{CheeseCategory, Product};

    fn batch() -> Batch {
        let product = Product::new("Roquefort", CheeseCategory::Sheep);
        Batch::new(&product, 30, NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(), Utc::now())
    }

    #[test]
    fn market_drops_customer() {
        assert_eq!(normalize_customer(DispatchKind::Market, Some("ABC Market")).unwrap(), None);
    }

    #[test]
    fn wholesale_requires_customer() {
        assert!(normalize_customer(DispatchKind::Wholesale, None).is_err());
        assert!(normalize_customer(DispatchKind::Wholesale, Some("  ")).is_err());
        assert_eq!(
            normalize_customer(DispatchKind::Wholesale, Some(" City Grocery ")).unwrap(),
            Some("City Grocery".to_string())
        );
    }

    #[test]
    fn destination_reflects_kind() {
        let b = batch();
        let market = Dispatch::new(&b, "Roquefort", 5, DispatchKind::Market, None, b.date);
        assert_eq!(market.destination(), "Market");

        let wholesale = Dispatch::new(
            &b,
            "Roquefort",
            5,
            DispatchKind::Wholesale,
            Some("Local Shop".to_string()),
            b.date,
        );
        assert_eq!(wholesale.destination(), "Local Shop");
        assert_eq!(wholesale.batch_code, "2402-1");
    }

    #[test]
    fn market_dispatch_omits_customer_field() {
        let b = batch();
        let d = Dispatch::new(&b, "Roquefort", 1, DispatchKind::Market, None, b.date);
        let json = serde_json::to_value(&d).unwrap();
        assert!(json.get("customer").is_none());
        assert_eq!(json["type"], "Market");
    }
}
