pub mod attempt_handler;
pub mod chat_handler;
pub mod health_handler;
pub mod quiz_handler;

pub use attempt_handler::{get_attempt, save_attempt};
pub use chat_handler::{append_chat, list_chats};
pub use health_handler::health_check;
pub use quiz_handler::{get_quiz, list_quizzes, parse_image, parse_pdf};
