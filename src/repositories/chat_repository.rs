use async_trait::async_trait;
use mongodb::{bson::doc, options::FindOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Chat};

#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn append(&self, chat: Chat) -> AppResult<Chat>;
    async fn list_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<Chat>>;
}

pub struct MongoChatRepository {
    collection: Collection<Chat>,
}

impl MongoChatRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("chats");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for chats collection");

        let teacher_index = IndexModel::builder()
            .keys(doc! { "teacherId": 1, "timestamp": 1 })
            .build();

        self.collection.create_index(teacher_index).await?;

        Ok(())
    }
}

#[async_trait]
impl ChatRepository for MongoChatRepository {
    async fn append(&self, chat: Chat) -> AppResult<Chat> {
        self.collection.insert_one(&chat).await?;
        Ok(chat)
    }

    async fn list_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<Chat>> {
        use futures::TryStreamExt;

        let find_options = FindOptions::builder()
            .sort(doc! { "timestamp": 1 })
            .build();

        let cursor = self
            .collection
            .find(doc! { "teacherId": teacher_id })
            .with_options(find_options)
            .await?;
        let items: Vec<Chat> = cursor.try_collect().await?;

        Ok(items)
    }
}
