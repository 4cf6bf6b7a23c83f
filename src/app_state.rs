use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoAttemptRepository, MongoChatRepository, MongoQuizRepository},
    services::{
        attempt_service::AttemptService,
        chat_service::ChatService,
        extraction::{CommandTextExtractor, TextExtractor},
        generation_client::{GenerationClient, OpenAiGenerationClient},
        quiz_service::QuizService,
        upload::UploadStore,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub attempt_service: Arc<AttemptService>,
    pub chat_service: Arc<ChatService>,
    pub extractor: Arc<dyn TextExtractor>,
    pub uploads: Arc<UploadStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let attempt_repository = Arc::new(MongoAttemptRepository::new(&db));
        attempt_repository.ensure_indexes().await?;

        let chat_repository = Arc::new(MongoChatRepository::new(&db));
        chat_repository.ensure_indexes().await?;

        let generation: Arc<dyn GenerationClient> =
            Arc::new(OpenAiGenerationClient::from_config(&config)?);

        let quiz_service = Arc::new(QuizService::new(
            quiz_repository,
            generation,
            config.generation_model.clone(),
        ));
        let attempt_service = Arc::new(AttemptService::new(attempt_repository));
        let chat_service = Arc::new(ChatService::new(chat_repository));

        Ok(Self {
            quiz_service,
            attempt_service,
            chat_service,
            extractor: Arc::new(CommandTextExtractor::from_config(&config)),
            uploads: Arc::new(UploadStore::new(config.upload_dir.clone())),
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
