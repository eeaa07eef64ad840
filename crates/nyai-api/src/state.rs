use std::sync::Arc;

use nyai_context::{ContextStrategy, FullHistoryStrategy};
use nyai_extract::ExtractorRegistry;
use nyai_llm::GenerativeClient;
use nyai_store::{ConversationStore, DocumentStore};

use crate::config::Config;
use crate::error::{ApiError, ApiResult};

/// Shared application state passed to all handlers.
///
/// The stores own their locks; everything else is immutable after startup.
/// `model` is `None` when no API credential was configured, and handlers
/// that need it get a typed configuration error instead of a crash.
pub struct AppState {
    pub config: Arc<Config>,
    pub conversations: ConversationStore,
    pub documents: DocumentStore,
    pub extractors: Arc<ExtractorRegistry>,
    pub context_strategy: Arc<dyn ContextStrategy>,
    pub http_client: reqwest::Client,
    model: Option<Arc<dyn GenerativeClient>>,
}

impl AppState {
    pub fn new(
        config: Config,
        extractors: ExtractorRegistry,
        model: Option<Arc<dyn GenerativeClient>>,
    ) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
            )
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            conversations: ConversationStore::new(),
            documents: DocumentStore::new(),
            extractors: Arc::new(extractors),
            context_strategy: Arc::new(FullHistoryStrategy),
            http_client,
            model,
        })
    }

    /// The configured model client, or the configuration error every
    /// model-dependent endpoint reports.
    pub fn model(&self) -> ApiResult<Arc<dyn GenerativeClient>> {
        self.model.clone().ok_or(ApiError::ModelUnconfigured)
    }

    pub fn model_configured(&self) -> bool {
        self.model.is_some()
    }
}
