use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Attempt};

#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn find(&self, quiz_id: &str, email: &str) -> AppResult<Option<Attempt>>;

    /// Replace the stored document for `(quizId, email)` as a whole,
    /// inserting if absent. Merging happens in the service against a
    /// point-in-time read; two concurrent saves can race and the later
    /// replace wins.
    async fn upsert(&self, attempt: Attempt) -> AppResult<Attempt>;
}

pub struct MongoAttemptRepository {
    collection: Collection<Attempt>,
}

impl MongoAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("attempts");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for attempts collection");

        let identity_index = IndexModel::builder()
            .keys(doc! { "quizId": 1, "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("quiz_email_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(identity_index).await?;

        Ok(())
    }
}

#[async_trait]
impl AttemptRepository for MongoAttemptRepository {
    async fn find(&self, quiz_id: &str, email: &str) -> AppResult<Option<Attempt>> {
        let attempt = self
            .collection
            .find_one(doc! { "quizId": quiz_id, "email": email })
            .await?;
        Ok(attempt)
    }

    async fn upsert(&self, attempt: Attempt) -> AppResult<Attempt> {
        self.collection
            .replace_one(
                doc! { "quizId": &attempt.quiz_id, "email": &attempt.email },
                &attempt,
            )
            .upsert(true)
            .await?;
        Ok(attempt)
    }
}
