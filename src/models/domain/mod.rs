pub mod attempt;
pub mod chat;
pub mod quiz;

pub use attempt::Attempt;
pub use chat::Chat;
pub use quiz::{Quiz, QuizQuestion};
