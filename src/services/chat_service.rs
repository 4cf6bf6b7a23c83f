use std::sync::Arc;
use validator::Validate;

use crate::{
    errors::AppResult,
    models::{domain::Chat, dto::request::AppendChatRequest},
    repositories::ChatRepository,
};

pub struct ChatService {
    repository: Arc<dyn ChatRepository>,
}

impl ChatService {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    pub async fn append(&self, request: AppendChatRequest) -> AppResult<Chat> {
        request.validate()?;

        let chat = Chat::new(
            &request.role,
            &request.text,
            request.meta.clone(),
            &request.teacher_id,
        );

        self.repository.append(chat).await
    }

    pub async fn list_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<Chat>> {
        self.repository.list_by_teacher(teacher_id).await
    }
}
