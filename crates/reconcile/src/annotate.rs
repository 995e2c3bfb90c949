use serde::Serialize;

use ledgerlink_core::{Amount, PurchaseTransaction, ReceiptFile};

use crate::filename::amount_from_name;
use crate::match_engine::{MatchStatus, PurchaseIndex};

/// A receipt from the listing, augmented with its parsed amount and its
/// classification against the purchase pool. This is the wire shape the
/// listing endpoint returns for each file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedReceipt {
    #[serde(flatten)]
    pub file: ReceiptFile,
    /// Amount parsed from the file name; `null` when the name carries none.
    pub amount: Option<Amount>,
    pub qb_match_status: MatchStatus,
    pub qb_match_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qb_transaction_id: Option<String>,
}

/// Annotate a receipt listing against an optionally-available purchase pool.
///
/// `transactions` is `None` when the caller holds no accounting session or
/// the purchase fetch failed; every receipt then degrades to an unmatched
/// classification while the amounts are still parsed. Receipt order is
/// preserved.
pub fn annotate(
    receipts: Vec<ReceiptFile>,
    transactions: Option<&[PurchaseTransaction]>,
) -> Vec<AnnotatedReceipt> {
    let index = transactions.map(PurchaseIndex::new);

    receipts
        .into_iter()
        .map(|file| {
            let amount = amount_from_name(&file.name);
            let result = match &index {
                Some(index) => index.classify(amount),
                None => crate::match_engine::MatchResult::none(),
            };
            AnnotatedReceipt {
                file,
                amount,
                qb_match_status: result.status,
                qb_match_count: result.match_count,
                qb_transaction_id: result.transaction_id,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerlink_core::PurchaseTransaction;

    fn receipt(id: &str, name: &str) -> ReceiptFile {
        ReceiptFile {
            id: id.into(),
            name: name.into(),
            path: None,
            size: None,
            created_date_time: None,
            last_modified_date_time: None,
            web_url: None,
            download_url: None,
            mime_type: None,
            created_by: None,
            last_modified_by: None,
        }
    }

    fn tx(id: &str, amount: &str) -> PurchaseTransaction {
        PurchaseTransaction::new(id, Amount::parse(amount).unwrap())
    }

    #[test]
    fn full_reconciliation_scenario() {
        let receipts = vec![
            receipt("a", "Randy, Azure, 48.21.pdf"),
            receipt("b", "Randy, Azure, 36.pdf"),
            receipt("c", "Invalid Name.pdf"),
        ];
        let pool = vec![tx("1", "48.21"), tx("2", "36"), tx("3", "36")];

        let annotated = annotate(receipts, Some(&pool));

        assert_eq!(annotated[0].amount, Amount::parse("48.21"));
        assert_eq!(annotated[0].qb_match_status, MatchStatus::Single);
        assert_eq!(annotated[0].qb_transaction_id.as_deref(), Some("1"));

        assert_eq!(annotated[1].amount, Amount::parse("36.00"));
        assert_eq!(annotated[1].qb_match_status, MatchStatus::Multiple);
        assert_eq!(annotated[1].qb_match_count, 2);
        assert_eq!(annotated[1].qb_transaction_id, None);

        assert_eq!(annotated[2].amount, None);
        assert_eq!(annotated[2].qb_match_status, MatchStatus::None);
        assert_eq!(annotated[2].qb_match_count, 0);
    }

    #[test]
    fn missing_pool_degrades_every_receipt_to_none() {
        let receipts = vec![
            receipt("a", "Randy, Azure, 48.21.pdf"),
            receipt("b", "Invalid Name.pdf"),
        ];

        let annotated = annotate(receipts, None);

        // Amounts are still parsed; only the matching is unavailable.
        assert_eq!(annotated[0].amount, Amount::parse("48.21"));
        for r in &annotated {
            assert_eq!(r.qb_match_status, MatchStatus::None);
            assert_eq!(r.qb_match_count, 0);
            assert_eq!(r.qb_transaction_id, None);
        }
    }

    #[test]
    fn order_is_preserved() {
        let receipts = vec![receipt("z", "Z, z, 1.pdf"), receipt("a", "A, a, 2.pdf")];
        let annotated = annotate(receipts, Some(&[]));
        assert_eq!(annotated[0].file.id, "z");
        assert_eq!(annotated[1].file.id, "a");
    }

    #[test]
    fn annotate_twice_yields_identical_output() {
        let receipts = vec![
            receipt("a", "Randy, Azure, 48.21.pdf"),
            receipt("b", "Randy, Azure, 36.pdf"),
        ];
        let pool = vec![tx("1", "48.21"), tx("2", "36"), tx("3", "36")];

        let first = annotate(receipts.clone(), Some(&pool));
        let second = annotate(receipts, Some(&pool));
        assert_eq!(first, second);
    }

    #[test]
    fn single_match_serializes_transaction_id_and_lowercase_status() {
        let annotated = annotate(
            vec![receipt("a", "Randy, Azure, 48.21.pdf")],
            Some(&[tx("1", "48.21")]),
        );
        let json = serde_json::to_value(&annotated[0]).unwrap();
        assert_eq!(json["qb_match_status"], "single");
        assert_eq!(json["qb_match_count"], 1);
        assert_eq!(json["qb_transaction_id"], "1");
    }

    #[test]
    fn unmatched_receipt_omits_transaction_id_and_nulls_amount() {
        let annotated = annotate(vec![receipt("c", "Invalid Name.pdf")], Some(&[]));
        let json = serde_json::to_value(&annotated[0]).unwrap();
        assert_eq!(json["qb_match_status"], "none");
        assert_eq!(json["amount"], serde_json::Value::Null);
        assert!(json.get("qb_transaction_id").is_none());
    }
}
