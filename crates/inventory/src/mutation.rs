use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use weide_core::{Entity, MutationId, ProductId};

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationKind {
    In,
    Out,
}

impl MutationKind {
    /// Sign applied to the quantity when summing the ledger.
    pub fn sign(&self) -> i64 {
        match self {
            MutationKind::In => 1,
            MutationKind::Out => -1,
        }
    }
}

/// Append-only ledger entry: one per quantity-affecting event.
///
/// Entries are never edited afterwards, except that `product_name` follows
/// product renames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryMutation {
    pub id: MutationId,
    pub date: DateTime<Utc>,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    #[serde(rename = "type")]
    pub kind: MutationKind,
    pub user: String,
}

impl InventoryMutation {
    pub fn new(
        kind: MutationKind,
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: u32,
        date: DateTime<Utc>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            id: MutationId::new(),
            date,
            product_id,
            product_name: product_name.into(),
            quantity,
            kind,
            user: user.into(),
        }
    }

    /// Entry for a signed stock change: `In` when positive, `Out` otherwise,
    /// with the absolute value as quantity.
    pub fn for_delta(
        delta: i64,
        product_id: ProductId,
        product_name: impl Into<String>,
        date: DateTime<Utc>,
        user: impl Into<String>,
    ) -> Self {
        let kind = if delta > 0 { MutationKind::In } else { MutationKind::Out };
        let quantity = u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX);
        Self::new(kind, product_id, product_name, quantity, date, user)
    }

    /// Signed effect of this entry on stock.
    pub fn signed_quantity(&self) -> i64 {
        self.kind.sign() * i64::from(self.quantity)
    }
}

impl Entity for InventoryMutation {
    type Id = MutationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_sign_picks_direction() {
        let pid = ProductId::new();
        let up = InventoryMutation::for_delta(12, pid, "Brie", Utc::now(), "System");
        assert_eq!((up.kind, up.quantity), (MutationKind::In, 12));

        let down = InventoryMutation::for_delta(-5, pid, "Brie", Utc::now(), "System");
        assert_eq!((down.kind, down.quantity), (MutationKind::Out, 5));
        assert_eq!(down.signed_quantity(), -5);
    }

    #[test]
    fn serializes_kind_as_type() {
        let m = InventoryMutation::new(MutationKind::Out, ProductId::new(), "Feta", 3, Utc::now(), "System");
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["type"], "Out");
        assert_eq!(json["productName"], "Feta");
    }
}
