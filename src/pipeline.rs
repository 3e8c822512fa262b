//! Request Orchestrator
//!
//! Runs one banking query through the linear pipeline:
//! RECEIVED → CLASSIFIED → ROUTED → FETCHED → HUMANIZED → COMPLETED
//!
//! Every stage makes exactly one attempt; any failure terminates the run
//! immediately. No state survives across requests, so many pipelines can
//! run concurrently without coordination.

use crate::classifier::QueryClassifier;
use crate::error::BankQueryError;
use crate::gateway::BankBackend;
use crate::generation::TextGenerator;
use crate::humanizer::ResponseHumanizer;
use crate::models::{BankQuery, Category, QueryReply};
use crate::router;
use crate::Result;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub struct Pipeline {
    classifier: QueryClassifier,
    humanizer: ResponseHumanizer,
    backend: Arc<dyn BankBackend>,
}

impl Pipeline {
    pub fn new(generator: Arc<dyn TextGenerator>, backend: Arc<dyn BankBackend>) -> Self {
        Self {
            classifier: QueryClassifier::new(generator.clone()),
            humanizer: ResponseHumanizer::new(generator),
            backend,
        }
    }

    /// Process one banking query end to end.
    pub async fn run(&self, query: BankQuery) -> Result<QueryReply> {
        let request_id = Uuid::new_v4();
        info!(
            %request_id,
            account = %query.account_number,
            "Received banking query"
        );

        let category = self.classifier.classify(&query.query_text).await?;

        // An unknown category is rejected before the router is consulted.
        if category == Category::Unknown {
            warn!(%request_id, "Query matched no operational category");
            return Err(BankQueryError::UnrecognizedQuery);
        }

        let endpoint = router::route(category)?;
        info!(%request_id, %category, endpoint, "Query routed");

        let raw_result = self.backend.fetch(endpoint, &query.account_number).await?;

        let response = self
            .humanizer
            .humanize(&query.query_text, &raw_result)
            .await?;

        info!(%request_id, "Pipeline completed");

        Ok(QueryReply { response })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ScriptedBackend;
    use crate::generation::ScriptedGenerator;
    use serde_json::json;

    fn balance_query() -> BankQuery {
        BankQuery {
            account_number: "123".to_string(),
            query_text: "what's my balance?".to_string(),
        }
    }

    #[tokio::test]
    async fn test_balance_happy_path() {
        let generator = Arc::new(ScriptedGenerator::replying(&[
            "balance",
            "Your balance is $100.",
        ]));
        let backend = Arc::new(ScriptedBackend::new(vec![Ok(json!({ "balance": 100 }))]));
        let pipeline = Pipeline::new(generator.clone(), backend.clone());

        let reply = pipeline.run(balance_query()).await.unwrap();

        assert_eq!(reply.response, "Your balance is $100.");
        assert_eq!(
            backend.calls(),
            vec![("account/balance".to_string(), "123".to_string())]
        );
        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_unknown_category_fails_before_backend() {
        let generator = Arc::new(ScriptedGenerator::replying(&["unknown"]));
        let backend = Arc::new(ScriptedBackend::new(vec![]));
        let pipeline = Pipeline::new(generator, backend.clone());

        let result = pipeline.run(balance_query()).await;

        match result {
            Err(err @ BankQueryError::UnrecognizedQuery) => {
                assert!(err.to_string().contains("Query not recognized."));
            }
            other => panic!("expected UnrecognizedQuery, got {:?}", other),
        }
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_label_treated_like_unknown() {
        let generator = Arc::new(ScriptedGenerator::replying(&["transfer_funds"]));
        let backend = Arc::new(ScriptedBackend::new(vec![]));
        let pipeline = Pipeline::new(generator, backend.clone());

        let result = pipeline.run(balance_query()).await;

        assert!(matches!(result, Err(BankQueryError::UnrecognizedQuery)));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_skips_humanizer() {
        let generator = Arc::new(ScriptedGenerator::replying(&["balance"]));
        let backend = Arc::new(ScriptedBackend::new(vec![Err(BankQueryError::Backend(
            "503 Service Unavailable: maintenance window".to_string(),
        ))]));
        let pipeline = Pipeline::new(generator.clone(), backend);

        let result = pipeline.run(balance_query()).await;

        match result {
            Err(BankQueryError::Backend(detail)) => {
                assert!(detail.contains("maintenance window"));
            }
            other => panic!("expected backend error, got {:?}", other),
        }
        // Only the classification call happened; the humanizer never ran.
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_classification_transport_failure_is_hard() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Err(
            BankQueryError::Generation("connection refused".to_string()),
        )]));
        let backend = Arc::new(ScriptedBackend::new(vec![]));
        let pipeline = Pipeline::new(generator, backend.clone());

        let result = pipeline.run(balance_query()).await;

        assert!(matches!(result, Err(BankQueryError::Generation(_))));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_humanizer_transport_failure_is_hard() {
        let generator = Arc::new(ScriptedGenerator::new(vec![
            Ok("balance".to_string()),
            Err(BankQueryError::Generation("connection reset".to_string())),
        ]));
        let backend = Arc::new(ScriptedBackend::new(vec![Ok(json!({ "balance": 100 }))]));
        let pipeline = Pipeline::new(generator, backend);

        let result = pipeline.run(balance_query()).await;

        // No fallback to returning the raw JSON to the caller.
        assert!(matches!(result, Err(BankQueryError::Generation(_))));
    }

    #[tokio::test]
    async fn test_identical_stubs_yield_identical_replies() {
        let mut replies = Vec::new();
        for _ in 0..2 {
            let generator = Arc::new(ScriptedGenerator::replying(&[
                "last_transaction",
                "You paid $25 to Acme on Monday.",
            ]));
            let backend = Arc::new(ScriptedBackend::new(vec![Ok(
                json!({ "amount": 25, "payee": "Acme" }),
            )]));
            let pipeline = Pipeline::new(generator, backend);

            replies.push(pipeline.run(balance_query()).await.unwrap());
        }

        assert_eq!(replies[0], replies[1]);
    }
}
