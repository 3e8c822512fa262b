//! Category Classifier
//!
//! Sends the user's free text to the generation service with a fixed
//! instruction prompt and normalizes the reply to one of the closed set of
//! banking categories, or `unknown`.

use crate::generation::TextGenerator;
use crate::models::Category;
use crate::Result;
use std::sync::Arc;
use tracing::info;

pub struct QueryClassifier {
    generator: Arc<dyn TextGenerator>,
}

impl QueryClassifier {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Classify a banking query into a `Category`.
    ///
    /// A transport failure from the generation service propagates as an
    /// error; only a successful-but-non-matching reply becomes
    /// `Category::Unknown`. Single attempt, no retry.
    pub async fn classify(&self, query_text: &str) -> Result<Category> {
        let prompt = build_classification_prompt(query_text);

        let reply = self.generator.generate(&prompt).await?;
        let category = Category::parse(&reply);

        info!(%category, "Query classified");

        Ok(category)
    }
}

fn build_classification_prompt(query_text: &str) -> String {
    format!(
        r#"Classify the following banking query into one of these categories:
- {}

If the query doesn't match, return 'unknown'.

Query: "{}"
Response:"#,
        Category::OPERATIONAL_LABELS.join("\n- "),
        query_text
    )
}
