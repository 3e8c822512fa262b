//! Backend Gateway
//!
//! Issues the authenticated call to the banking backend for a resolved
//! endpoint and hands back the raw JSON payload untouched. The gateway
//! does not know the shape of any specific endpoint's payload.

use crate::config::BankApiConfig;
use crate::error::BankQueryError;
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info};

/// Capability seam for the banking backend, mockable in tests.
#[async_trait]
pub trait BankBackend: Send + Sync {
    async fn fetch(&self, endpoint: &str, account_number: &str) -> Result<Value>;
}

/// Reusable bank API client (connection-pooled)
pub struct BankApiClient {
    client: Client,
    config: BankApiConfig,
}

impl BankApiClient {
    pub fn new(config: BankApiConfig) -> Self {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }
}

#[async_trait]
impl BankBackend for BankApiClient {
    /// Fetch data for one account from one backend endpoint.
    ///
    /// Single attempt, transport-default timeout. Any transport failure or
    /// non-success status collapses into one `Backend` error carrying the
    /// upstream detail; the error body is exposed, never reinterpreted.
    async fn fetch(&self, endpoint: &str, account_number: &str) -> Result<Value> {
        let url = format!("{}/{}", self.config.base_url, endpoint);
        let body = serde_json::json!({ "account_number": account_number });

        info!(%endpoint, "Calling bank API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Bank API request failed: {}", e);
                BankQueryError::Backend(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(%status, "Bank API error response: {}", error_text);
            return Err(BankQueryError::Backend(format!(
                "{}: {}",
                status, error_text
            )));
        }

        let payload: Value = response.json().await.map_err(|e| {
            error!("Failed to parse bank API response: {}", e);
            BankQueryError::Backend(format!("Invalid response body: {}", e))
        })?;

        Ok(payload)
    }
}

/// Scripted backend for development & testing
/// Hands out queued results and records the calls it receives.
pub struct ScriptedBackend {
    results: std::sync::Mutex<std::collections::VecDeque<Result<Value>>>,
    calls: std::sync::Mutex<Vec<(String, String)>>,
}

impl ScriptedBackend {
    pub fn new(results: Vec<Result<Value>>) -> Self {
        Self {
            results: std::sync::Mutex::new(results.into_iter().collect()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// (endpoint, account_number) pairs seen, in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().expect("call log poisoned").clone()
    }
}

#[async_trait]
impl BankBackend for ScriptedBackend {
    async fn fetch(&self, endpoint: &str, account_number: &str) -> Result<Value> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push((endpoint.to_string(), account_number.to_string()));

        self.results
            .lock()
            .expect("result script poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(BankQueryError::Backend(
                    "Scripted backend exhausted".to_string(),
                ))
            })
    }
}
