pub mod attempt_repository;
pub mod chat_repository;
pub mod quiz_repository;

pub use attempt_repository::{AttemptRepository, MongoAttemptRepository};
pub use chat_repository::{ChatRepository, MongoChatRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
