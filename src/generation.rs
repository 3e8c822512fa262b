//! Text-generation service boundary
//!
//! The pipeline talks to the generation service (DeepSeek via Ollama)
//! through the narrow `TextGenerator` capability, so the backend is
//! swappable and mockable without touching pipeline logic.
//! Uses a long-lived reqwest::Client for connection pooling.

use crate::config::GenerationConfig;
use crate::error::BankQueryError;
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

/// Single-turn text generation: one prompt in, one reply out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Reusable Ollama chat client (connection-pooled)
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(config: GenerationConfig) -> Self {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url,
            model: config.model,
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            stream: false,
        };

        info!(model = %self.model, "Calling generation service");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Generation request failed: {}", e);
                BankQueryError::Generation(format!("Generation request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Generation service error response: {}", error_text);
            return Err(BankQueryError::Generation(format!(
                "Generation service error: {}",
                error_text
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!("Failed to parse generation response: {}", e);
            BankQueryError::Generation(format!("Generation parse error: {}", e))
        })?;

        Ok(chat_response.message.content)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

/// Scripted generator for development & testing
/// Keeps the pipeline exercisable without a running Ollama instance.
/// Replies are handed out in order; the prompts seen are recorded.
pub struct ScriptedGenerator {
    replies: std::sync::Mutex<std::collections::VecDeque<Result<String>>>,
    prompts: std::sync::Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: std::sync::Mutex::new(replies.into_iter().collect()),
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Convenience constructor for plain-text scripts.
    pub fn replying(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    /// Number of generation calls made so far.
    pub fn calls(&self) -> usize {
        self.prompts.lock().expect("prompt log poisoned").len()
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());

        self.replies
            .lock()
            .expect("reply script poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(BankQueryError::Generation(
                    "Scripted generator exhausted".to_string(),
                ))
            })
    }
}
