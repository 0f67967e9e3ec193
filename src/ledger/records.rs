use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single fee payment transaction as returned by the receipts endpoint.
///
/// Field names mirror the backend's JSON keys, which are not consistently
/// cased (`rollno` vs `rollNo` across endpoints). Amount fields other than
/// `totalAmount` default to zero when the backend omits them; a missing
/// `totalAmount` is surfaced as an explicit error during aggregation rather
/// than silently poisoning the sums.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentRecord {
    #[serde(rename = "rollno")]
    pub roll_no: String,
    pub name: String,
    #[serde(rename = "std")]
    pub standard: String,
    #[serde(rename = "receiptno")]
    pub receipt_no: String,
    #[serde(rename = "totalAmount", default)]
    pub total_amount: Option<f64>,
    #[serde(rename = "tuitionFee", default)]
    pub tuition_fee: f64,
    #[serde(rename = "admissionfee", default)]
    pub admission_fee: f64,
    #[serde(rename = "prospectusFee", default)]
    pub prospectus_fee: f64,
    #[serde(rename = "transportFee", default)]
    pub transport_fee: f64,
    #[serde(rename = "other", default)]
    pub other_fee: f64,
    pub date: String,
}

/// Reference data from the students endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StudentRecord {
    #[serde(rename = "rollNo")]
    pub roll_no: String,
    pub name: String,
    pub standard: String,
}

/// A single payment looked up by id, used for receipt printing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentDetail {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub amount: Option<f64>,
    pub date: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "rollNo")]
    pub roll_no: Option<String>,
}

/// Format a backend date string for display. The backend is loose about
/// formats, so try RFC 3339 first, then a bare date; anything else renders
/// as "invalid date" rather than failing the whole view.
pub fn format_record_date(raw: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d/%m/%Y").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%d/%m/%Y").to_string();
    }
    "invalid date".to_string()
}
