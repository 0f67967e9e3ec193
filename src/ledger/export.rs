use std::path::Path;

use serde::Serialize;

use crate::config::School;
use crate::error::Result;
use crate::ledger::aggregate::StudentAggregate;
use crate::ledger::records::{format_record_date, PaymentRecord};

/// Human-readable one-line summary of a receipt, used in the
/// "Receipt Details" column of both exports.
pub fn receipt_summary(record: &PaymentRecord) -> String {
    format!(
        "Receipt {}: {:.2} (tuition {:.2}, admission {:.2}, prospectus {:.2}, transport {:.2}, other {:.2}) on {}",
        record.receipt_no,
        record.total_amount.unwrap_or(0.0),
        record.tuition_fee,
        record.admission_fee,
        record.prospectus_fee,
        record.transport_fee,
        record.other_fee,
        format_record_date(&record.date),
    )
}

/// Write the per-student summary as CSV: one row per student, with the
/// receipt details newline-joined inside a single quoted field.
pub fn write_csv(aggregates: &[StudentAggregate], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record([
        "Roll No",
        "Name",
        "Total Fee",
        "Total Paid",
        "Dues Fee",
        "Receipt Details",
    ])?;

    for agg in aggregates {
        let details: Vec<String> = agg.receipts.iter().map(receipt_summary).collect();
        writer.write_record([
            agg.roll_no.as_str(),
            agg.name.as_str(),
            &format!("{:.2}", agg.total_fee),
            &format!("{:.2}", agg.total_paid),
            &format!("{:.2}", agg.dues_fee),
            &details.join("\n"),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// A single student row in the summary PDF.
#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub roll_no: String,
    pub name: String,
    pub standard: String,
    pub total_fee: f64,
    pub total_paid: f64,
    pub dues_fee: f64,
    pub details: Vec<String>,
}

/// Complete data for rendering the payment summary PDF.
#[derive(Debug, Serialize)]
pub struct SummaryData {
    pub school: School,
    pub rows: Vec<SummaryRow>,
    pub total_fee: f64,
    pub total_paid: f64,
    pub total_dues: f64,
    pub currency_symbol: String,
    pub generated_date: String,
    pub filter_roll_no: Option<String>,
}

/// Project aggregates into the summary PDF's row/column layout.
pub fn build_summary_data(
    school: &School,
    aggregates: &[StudentAggregate],
    currency_symbol: &str,
    filter_roll_no: Option<&str>,
) -> SummaryData {
    let rows: Vec<SummaryRow> = aggregates
        .iter()
        .map(|agg| SummaryRow {
            roll_no: agg.roll_no.clone(),
            name: agg.name.clone(),
            standard: agg.standard.clone(),
            total_fee: agg.total_fee,
            total_paid: agg.total_paid,
            dues_fee: agg.dues_fee,
            details: agg.receipts.iter().map(receipt_summary).collect(),
        })
        .collect();

    let total_fee: f64 = aggregates.iter().map(|a| a.total_fee).sum();
    let total_paid: f64 = aggregates.iter().map(|a| a.total_paid).sum();
    let total_dues = total_fee - total_paid;

    SummaryData {
        school: school.clone(),
        rows,
        total_fee,
        total_paid,
        total_dues,
        currency_symbol: currency_symbol.to_string(),
        generated_date: chrono::Local::now().format("%B %d, %Y").to_string(),
        filter_roll_no: filter_roll_no.map(str::to_string),
    }
}
