use std::collections::HashMap;

use serde::Serialize;

use crate::error::{FeeLedgerError, Result};
use crate::ledger::records::PaymentRecord;

/// Per-student view derived from the flat payment records.
///
/// `receipts` keeps the student's records in encounter order; `dues_fee` is
/// kept consistent with `total_paid` after every record is folded in, and is
/// deliberately not clamped at zero so overpayment shows as negative dues.
#[derive(Debug, Clone, Serialize)]
pub struct StudentAggregate {
    pub roll_no: String,
    pub name: String,
    pub standard: String,
    pub receipts: Vec<PaymentRecord>,
    pub total_paid: f64,
    pub total_fee: f64,
    pub dues_fee: f64,
}

/// Group payment records by roll number in a single linear pass.
///
/// Output order is the first-appearance order of distinct roll numbers in
/// the input. An optional filter restricts the pass to records whose roll
/// number matches exactly; an empty filter string means no filter. Name and
/// standard are taken from the first record seen for each roll number; two
/// students sharing a roll number are silently merged.
pub fn aggregate_payments(
    records: &[PaymentRecord],
    roll_filter: Option<&str>,
    total_fee: f64,
) -> Result<Vec<StudentAggregate>> {
    let roll_filter = roll_filter.filter(|f| !f.is_empty());

    let mut aggregates: Vec<StudentAggregate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        if let Some(filter) = roll_filter {
            if record.roll_no != filter {
                continue;
            }
        }

        let amount = record.total_amount.ok_or_else(|| FeeLedgerError::MissingField {
            record: record.receipt_no.clone(),
            field: "totalAmount".to_string(),
        })?;

        let idx = match index.get(&record.roll_no) {
            Some(&i) => i,
            None => {
                index.insert(record.roll_no.clone(), aggregates.len());
                aggregates.push(StudentAggregate {
                    roll_no: record.roll_no.clone(),
                    name: record.name.clone(),
                    standard: record.standard.clone(),
                    receipts: Vec::new(),
                    total_paid: 0.0,
                    total_fee,
                    dues_fee: total_fee,
                });
                aggregates.len() - 1
            }
        };

        let agg = &mut aggregates[idx];
        agg.receipts.push(record.clone());
        agg.total_paid += amount;
        agg.dues_fee = total_fee - agg.total_paid;
    }

    Ok(aggregates)
}
