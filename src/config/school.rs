use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub school: School,
    pub api: ApiSettings,
    pub fees: FeeSettings,
    pub receipt: ReceiptSettings,
    pub pdf: PdfSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct School {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Course printed on receipts (e.g., "B.Ed")
    pub course: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Serialize)]
pub struct FeeSettings {
    /// Fixed total fee owed per student; dues = total_fee - paid to date.
    pub total_fee: f64,
    pub currency_symbol: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReceiptSettings {
    /// Prefix for issued receipt numbers (e.g., "NNG" -> "NNG-4821")
    pub number_prefix: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PdfSettings {
    pub output_dir: String,
}
