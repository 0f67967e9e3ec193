pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod pdf;

pub use config::{Config, School, State};
pub use error::{FeeLedgerError, Result};
pub use ledger::{
    aggregate_payments, project_fee_lines, FeeLineItem, PaymentRecord, StudentAggregate,
    StudentRecord,
};
