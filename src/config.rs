//! Process-wide configuration
//!
//! All external-service settings are read from the environment exactly once
//! at startup and handed to components as immutable values. Business logic
//! never touches the environment directly, so every component stays
//! testable with injected configuration.

use crate::error::BankQueryError;
use crate::Result;

/// Connection settings for the banking backend.
#[derive(Debug, Clone)]
pub struct BankApiConfig {
    /// Base URL, e.g. "https://api.bank.com"
    pub base_url: String,
    /// Bearer token sent on every backend call
    pub api_key: String,
}

/// Connection settings for the Ollama text-generation service.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub base_url: String,
    pub model: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:11434".to_string(),
            model: "deepseek".to_string(),
        }
    }
}

/// Full process configuration, immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bank_api: BankApiConfig,
    pub generation: GenerationConfig,
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// `BANK_API_URL` and `BANK_API_KEY` are required; the generation
    /// service falls back to a local Ollama default, the port to 8080.
    pub fn from_env() -> Result<Self> {
        let bank_api = BankApiConfig {
            base_url: require_var("BANK_API_URL")?,
            api_key: require_var("BANK_API_KEY")?,
        };

        let defaults = GenerationConfig::default();
        let generation = GenerationConfig {
            base_url: std::env::var("OLLAMA_URL").unwrap_or(defaults.base_url),
            model: std::env::var("OLLAMA_MODEL").unwrap_or(defaults.model),
        };

        let port = std::env::var("PORT")
            .or_else(|_| std::env::var("API_PORT"))
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|e| BankQueryError::Config(format!("Invalid port: {}", e)))?;

        Ok(Self {
            bank_api,
            generation,
            port,
        })
    }
}

fn require_var(name: &str) -> Result<String> {
    let value = std::env::var(name)
        .map_err(|_| BankQueryError::Config(format!("{} not set", name)))?;
    if value.trim().is_empty() {
        return Err(BankQueryError::Config(format!("{} is empty", name)));
    }
    Ok(value)
}
