use anyhow::{Context, Result};
use recipe_gen::catalog::Catalog;
use recipe_gen::cli::parse_args;
use recipe_gen::image_api::OpenAiImageClient;
use recipe_gen::server::{app, AppState};
use std::path::Path;
use std::sync::Arc;

// Define the environment variable name for the API key
const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok(); // Load .env file for API keys
    tracing_subscriber::fmt::init();

    let cli_args = parse_args();

    let catalog = Catalog::load(Path::new(&cli_args.catalog_file)).with_context(|| {
        format!(
            "Failed to load ingredient catalog from '{}'",
            cli_args.catalog_file
        )
    })?;
    tracing::info!(ingredients = catalog.len(), "ingredient catalog loaded");

    let images =
        OpenAiImageClient::new(API_KEY_ENV_VAR).context("Failed to build image API client")?;

    let state = AppState {
        catalog: Arc::new(catalog),
        images: Arc::new(images),
    };

    let listener = tokio::net::TcpListener::bind(&cli_args.listen)
        .await
        .with_context(|| format!("Failed to bind to '{}'", cli_args.listen))?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
