use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nyai_api::{build_router, config::Config, state::AppState};
use nyai_extract::{DocumentKind, ExtractorRegistry};
use nyai_llm::{GeminiClient, GenerativeClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load().map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting NyAI API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Probe extraction capabilities once; anything missing stays disabled
    // for the life of the process and reports as such per request.
    let extractors = ExtractorRegistry::probe();
    tracing::info!(
        pdf = extractors.supports(DocumentKind::Pdf),
        docx = extractors.supports(DocumentKind::WordDocument),
        ocr = extractors.supports(DocumentKind::Image),
        "extraction capabilities probed"
    );

    let model: Option<Arc<dyn GenerativeClient>> = match config.google_api_key.as_deref() {
        Some(key) => {
            tracing::info!("Gemini model configured");
            Some(Arc::new(GeminiClient::new(key)?))
        }
        None => {
            tracing::warn!("GOOGLE_API_KEY not set - model-dependent endpoints disabled");
            None
        }
    };

    let state = Arc::new(AppState::new(config.clone(), extractors, model)?);
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
