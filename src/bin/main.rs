use bank_query_pipeline::{
    config::AppConfig,
    gateway::BankApiClient,
    generation::OllamaClient,
    models::BankQuery,
    pipeline::Pipeline,
};
use std::sync::Arc;
use tracing::info;

/// One-shot CLI: run a single banking query through the pipeline.
///
/// Usage: query <account_number> <query text...>
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let account_number = args.next().unwrap_or_else(|| "123".to_string());
    let query_text = args.collect::<Vec<_>>().join(" ");
    let query_text = if query_text.is_empty() {
        "what's my balance?".to_string()
    } else {
        query_text
    };

    let config = AppConfig::from_env()?;

    // Create components
    let generator = Arc::new(OllamaClient::new(config.generation));
    let backend = Arc::new(BankApiClient::new(config.bank_api));
    let pipeline = Pipeline::new(generator, backend);

    let query = BankQuery {
        account_number,
        query_text,
    };

    info!(
        account = %query.account_number,
        query = %query.query_text,
        "Running banking query pipeline"
    );

    match pipeline.run(query).await {
        Ok(reply) => {
            println!("\n=== REPLY ===");
            println!("{}", reply.response);
            Ok(())
        }
        Err(e) => {
            eprintln!("Query failed: {}", e);
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}
