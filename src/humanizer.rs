//! Response Humanizer
//!
//! Converts the raw backend payload into a short user-facing message via
//! the generation service. The payload is rendered as pretty-printed JSON
//! inside a fixed instruction prompt; the generated prose is returned
//! verbatim after trimming.

use crate::generation::TextGenerator;
use crate::Result;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub struct ResponseHumanizer {
    generator: Arc<dyn TextGenerator>,
}

impl ResponseHumanizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Rewrite a raw backend result into natural language.
    ///
    /// No validation of the generated content and no local length bound;
    /// a transport failure is a hard failure with no raw-JSON fallback.
    pub async fn humanize(&self, query_text: &str, raw_result: &Value) -> Result<String> {
        let prompt = build_humanization_prompt(query_text, raw_result)?;

        let reply = self.generator.generate(&prompt).await?;
        let reply = reply.trim().to_string();

        info!(reply_len = reply.len(), "Humanized backend response");

        Ok(reply)
    }
}

fn build_humanization_prompt(query_text: &str, raw_result: &Value) -> Result<String> {
    let rendered = serde_json::to_string_pretty(raw_result)?;

    Ok(format!(
        r#"Convert the following banking API JSON response into a user-friendly message:

Query: "{}"
JSON Response:
{}

Format it in a short, clear message."#,
        query_text, rendered
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BankQueryError;
    use crate::generation::ScriptedGenerator;

    #[test]
    fn test_prompt_embeds_query_and_payload() {
        let raw = serde_json::json!({ "balance": 100 });
        let prompt = build_humanization_prompt("what's my balance?", &raw).unwrap();

        assert!(prompt.contains(r#"Query: "what's my balance?""#));
        assert!(prompt.contains("\"balance\": 100"));
    }

    #[tokio::test]
    async fn test_reply_is_trimmed_but_otherwise_verbatim() {
        let generator = Arc::new(ScriptedGenerator::replying(&[
            "\n  Your balance is $100.  \n",
        ]));
        let humanizer = ResponseHumanizer::new(generator);

        let reply = humanizer
            .humanize("what's my balance?", &serde_json::json!({ "balance": 100 }))
            .await
            .unwrap();

        assert_eq!(reply, "Your balance is $100.");
    }

    #[tokio::test]
    async fn test_transport_failure_is_hard() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Err(
            BankQueryError::Generation("connection reset".to_string()),
        )]));
        let humanizer = ResponseHumanizer::new(generator);

        let result = humanizer
            .humanize("what's my balance?", &serde_json::json!({ "balance": 100 }))
            .await;

        assert!(matches!(result, Err(BankQueryError::Generation(_))));
    }
}
