use std::sync::Arc;

use rewriter_llm::{GenerationClient, GenerationService, OpenAIService};

use crate::config::ServiceConfig;
use crate::rewrite::rewrite_service::RewriteService;

#[derive(Clone)]
pub struct AppService {
    pub rewrite_service: RewriteService,
}

impl AppService {
    pub fn new(generation_client: GenerationClient) -> Self {
        let rewrite_service = RewriteService::new(generation_client);

        Self { rewrite_service }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub service: AppService,
}

impl AppState {
    pub fn new(config: &ServiceConfig) -> Self {
        let openai_service = OpenAIService::new(config.completion_config());
        let generation_client = GenerationClient::new(Arc::new(openai_service))
            .with_config(config.generation_client_config());

        Self {
            service: AppService::new(generation_client),
        }
    }

    pub fn with_generation_service(service: Arc<dyn GenerationService>) -> Self {
        Self {
            service: AppService::new(GenerationClient::new(service)),
        }
    }
}
