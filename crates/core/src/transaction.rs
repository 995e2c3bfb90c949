use serde::{Deserialize, Serialize};

use super::money::Amount;

/// A purchase record from the accounting system, reduced to the fields
/// matching needs. Fetched fresh per request; an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseTransaction {
    pub id: String,
    pub total_amount: Amount,
}

impl PurchaseTransaction {
    pub fn new(id: impl Into<String>, total_amount: Amount) -> Self {
        PurchaseTransaction {
            id: id.into(),
            total_amount,
        }
    }
}
