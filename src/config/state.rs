use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Persisted ledger state. Currently only holds receipt numbers that have
/// been issued, keyed by payment id, so that reprinting a receipt shows the
/// same number as the original printout.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct State {
    #[serde(default)]
    pub receipt_numbers: BTreeMap<String, String>,
}

impl State {
    /// Look up the receipt number issued for a payment, if any.
    pub fn issued_number(&self, payment_id: &str) -> Option<&str> {
        self.receipt_numbers.get(payment_id).map(String::as_str)
    }

    /// Record a newly issued receipt number for a payment.
    pub fn record_number(&mut self, payment_id: &str, number: String) {
        self.receipt_numbers.insert(payment_id.to_string(), number);
    }
}
