use bank_query_pipeline::{
    api::start_server,
    config::AppConfig,
    gateway::BankApiClient,
    generation::OllamaClient,
    pipeline::Pipeline,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;

    info!("Banking Query Pipeline - API Server");
    info!("Port: {}", config.port);
    info!("Bank API: {}", config.bank_api.base_url);
    info!("Generation model: {}", config.generation.model);

    // Create components
    let generator = Arc::new(OllamaClient::new(config.generation));
    let backend = Arc::new(BankApiClient::new(config.bank_api));
    let pipeline = Arc::new(Pipeline::new(generator, backend));

    info!("Pipeline initialized");
    info!("Starting API server...");

    // Start API server
    start_server(pipeline, config.port).await?;

    Ok(())
}
