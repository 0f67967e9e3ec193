mod aggregate;
mod export;
mod receipt;
mod records;

pub use aggregate::{aggregate_payments, StudentAggregate};
pub use export::{build_summary_data, receipt_summary, write_csv, SummaryData, SummaryRow};
pub use receipt::{
    amount_in_words, generate_receipt_number, project_fee_lines, resolve_receipt_number,
    FeeLineItem, ReceiptData, FEE_CATALOGUE,
};
pub use records::{format_record_date, PaymentDetail, PaymentRecord, StudentRecord};
