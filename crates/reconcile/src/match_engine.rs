use std::collections::HashMap;

use serde::Serialize;

use ledgerlink_core::{Amount, PurchaseTransaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    None,
    Single,
    Multiple,
}

/// Classification of one receipt against the purchase pool.
///
/// Constructed only through [`MatchResult::none`], [`MatchResult::single`]
/// and [`MatchResult::multiple`], so an inconsistent combination (e.g. a
/// transaction id on an ambiguous match) is unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub status: MatchStatus,
    pub match_count: usize,
    pub transaction_id: Option<String>,
}

impl MatchResult {
    pub fn none() -> Self {
        MatchResult {
            status: MatchStatus::None,
            match_count: 0,
            transaction_id: None,
        }
    }

    pub fn single(transaction_id: impl Into<String>) -> Self {
        MatchResult {
            status: MatchStatus::Single,
            match_count: 1,
            transaction_id: Some(transaction_id.into()),
        }
    }

    pub fn multiple(count: usize) -> Self {
        debug_assert!(count > 1);
        MatchResult {
            status: MatchStatus::Multiple,
            match_count: count,
            transaction_id: None,
        }
    }
}

/// Purchase transactions indexed by exact amount.
///
/// Transactions with a non-positive amount never participate in matching;
/// they are excluded at build time rather than checked per lookup.
#[derive(Debug, Default)]
pub struct PurchaseIndex {
    by_amount: HashMap<Amount, Vec<String>>,
}

impl PurchaseIndex {
    pub fn new(transactions: &[PurchaseTransaction]) -> Self {
        let mut by_amount: HashMap<Amount, Vec<String>> = HashMap::new();
        for tx in transactions.iter().filter(|t| t.total_amount.is_positive()) {
            by_amount
                .entry(tx.total_amount)
                .or_default()
                .push(tx.id.clone());
        }
        PurchaseIndex { by_amount }
    }

    /// Classify a receipt's parsed amount. An absent or non-positive amount
    /// is always `none`; ties are reported, never auto-resolved.
    pub fn classify(&self, amount: Option<Amount>) -> MatchResult {
        let Some(amount) = amount.filter(|a| a.is_positive()) else {
            return MatchResult::none();
        };
        match self.by_amount.get(&amount).map(Vec::as_slice) {
            None | Some([]) => MatchResult::none(),
            Some([only]) => MatchResult::single(only.clone()),
            Some(many) => MatchResult::multiple(many.len()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_amount.is_empty()
    }
}
