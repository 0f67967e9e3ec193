use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use ureq::Agent;

use crate::config::ApiSettings;
use crate::error::{FeeLedgerError, Result};
use crate::ledger::{PaymentDetail, PaymentRecord, StudentRecord};

/// Read client for the fee backend. The base URL and timeout come from
/// config so tests can point it at a double instead of the live backend.
pub struct ApiClient {
    agent: Agent,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(settings.timeout_secs)))
            .build()
            .into();

        Self {
            agent,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// All fee payment transactions.
    pub fn fetch_receipts(&self) -> Result<Vec<PaymentRecord>> {
        self.get_json("/api/receipts")
    }

    /// All enrolled students.
    pub fn fetch_students(&self) -> Result<Vec<StudentRecord>> {
        self.get_json("/api/students")
    }

    /// A single payment by id, for receipt printing.
    pub fn fetch_payment(&self, payment_id: &str) -> Result<PaymentDetail> {
        self.get_json(&format!("/api/payments/{payment_id}"))
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);

        let body = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| FeeLedgerError::Fetch {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?
            .body_mut()
            .read_to_string()
            .map_err(|e| FeeLedgerError::Fetch {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        serde_json::from_str(&body).map_err(|e| FeeLedgerError::Decode {
            endpoint: endpoint.to_string(),
            source: e,
        })
    }
}

/// Read records from a local JSON snapshot instead of the backend.
/// The file carries the same shape as the corresponding API response.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| FeeLedgerError::InputFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| FeeLedgerError::InputFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
