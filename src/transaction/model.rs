use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A value transfer between two opaque addresses.
///
/// `amount` is any JSON number, integral or fractional, kept exactly as
/// submitted. It is not checked for sign or balance; the ledger only orders
/// and records transfers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: Number,
}

impl Transaction {
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Number>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Transaction;

    #[test]
    fn missing_field_is_rejected() {
        let raw = r#"{"sender":"a","amount":3}"#;
        assert!(serde_json::from_str::<Transaction>(raw).is_err());
    }

    #[test]
    fn negative_amounts_are_accepted() {
        let tx: Transaction =
            serde_json::from_str(r#"{"sender":"a","recipient":"b","amount":-7}"#).unwrap();
        assert_eq!(tx, Transaction::new("a", "b", -7));
    }

    #[test]
    fn fractional_amount_keeps_its_form() {
        let raw = r#"{"sender":"a","recipient":"b","amount":1.5}"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.amount.as_f64(), Some(1.5));
        assert_eq!(
            serde_json::to_string(&tx).unwrap(),
            r#"{"sender":"a","recipient":"b","amount":1.5}"#
        );
    }

    #[test]
    fn integral_amount_stays_integral() {
        let tx = Transaction::new("a", "b", 10);
        assert_eq!(
            serde_json::to_string(&tx).unwrap(),
            r#"{"sender":"a","recipient":"b","amount":10}"#
        );
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let raw = r#"{"sender":"a","recipient":"b","amount":"ten"}"#;
        assert!(serde_json::from_str::<Transaction>(raw).is_err());
    }
}
