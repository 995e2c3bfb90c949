use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

use ledgerlink_core::{Amount, PurchaseTransaction};

/// Envelope of a QuickBooks `query` response.
#[derive(Debug, Deserialize)]
pub struct QueryEnvelope {
    #[serde(rename = "QueryResponse", default)]
    pub query_response: PurchaseQueryResponse,
}

#[derive(Debug, Default, Deserialize)]
pub struct PurchaseQueryResponse {
    #[serde(rename = "Purchase", default)]
    pub purchases: Vec<RawPurchase>,
}

/// A purchase as QuickBooks returns it, before any validation. `TotalAmt`
/// is kept as raw JSON so a malformed value drops that one record instead
/// of failing the whole response.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPurchase {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "TotalAmt", default)]
    pub total_amt: Option<Value>,
}

/// Build the matching pool from raw purchases. A purchase whose total is
/// missing, malformed, or non-positive never participates in matching and
/// is silently excluded. Order is preserved for the rest.
pub fn purchase_pool(purchases: Vec<RawPurchase>) -> Vec<PurchaseTransaction> {
    purchases
        .into_iter()
        .filter_map(|p| {
            let total = decimal_from_json(p.total_amt.as_ref()?)?;
            let amount = Amount::from_decimal(total);
            amount
                .is_positive()
                .then(|| PurchaseTransaction::new(p.id, amount))
        })
        .collect()
}

/// Read a decimal out of a JSON value via its literal representation, not
/// `f64`, so `48.21` stays exactly `48.21`.
fn decimal_from_json(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PURCHASE_RESPONSE: &str = r#"{
        "QueryResponse": {
            "Purchase": [
                { "Id": "1", "TotalAmt": 48.21, "PaymentType": "Cash" },
                { "Id": "2", "TotalAmt": 36, "PaymentType": "Cash" },
                { "Id": "3", "TotalAmt": 36.00, "PaymentType": "Cash" },
                { "Id": "4", "TotalAmt": "not-a-number" },
                { "Id": "5", "TotalAmt": -12.00 },
                { "Id": "6" }
            ],
            "startPosition": 1,
            "maxResults": 6
        },
        "time": "2024-05-02T12:00:00.000-07:00"
    }"#;

    #[test]
    fn envelope_deserializes_and_pool_drops_bad_records() {
        let envelope: QueryEnvelope = serde_json::from_str(PURCHASE_RESPONSE).unwrap();
        let pool = purchase_pool(envelope.query_response.purchases);

        // 4 (malformed), 5 (negative) and 6 (missing) are excluded.
        let ids: Vec<&str> = pool.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn number_totals_keep_exact_decimal_value() {
        let envelope: QueryEnvelope = serde_json::from_str(PURCHASE_RESPONSE).unwrap();
        let pool = purchase_pool(envelope.query_response.purchases);
        assert_eq!(pool[0].total_amount, Amount::parse("48.21").unwrap());
        // 36 and 36.00 are the same amount.
        assert_eq!(pool[1].total_amount, pool[2].total_amount);
    }

    #[test]
    fn string_total_is_accepted_when_numeric() {
        let raw = RawPurchase {
            id: "7".into(),
            total_amt: Some(Value::String("19.95".into())),
        };
        let pool = purchase_pool(vec![raw]);
        assert_eq!(pool[0].total_amount, Amount::parse("19.95").unwrap());
    }

    #[test]
    fn zero_total_is_excluded() {
        let raw = RawPurchase {
            id: "8".into(),
            total_amt: Some(serde_json::json!(0)),
        };
        assert!(purchase_pool(vec![raw]).is_empty());
    }

    #[test]
    fn empty_query_response_yields_empty_pool() {
        let envelope: QueryEnvelope = serde_json::from_str(r#"{"QueryResponse": {}}"#).unwrap();
        assert!(purchase_pool(envelope.query_response.purchases).is_empty());
    }

    #[test]
    fn missing_query_response_yields_empty_pool() {
        let envelope: QueryEnvelope = serde_json::from_str("{}").unwrap();
        assert!(purchase_pool(envelope.query_response.purchases).is_empty());
    }
}
