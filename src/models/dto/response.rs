use serde::Serialize;

use crate::models::domain::{Attempt, Chat, Quiz};

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub ok: bool,
    pub quiz: Quiz,
    #[serde(rename = "fileUrl", skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl QuizResponse {
    pub fn new(quiz: Quiz) -> Self {
        let file_url = quiz
            .file_path
            .as_deref()
            .map(crate::services::upload::public_url);
        QuizResponse {
            ok: true,
            quiz,
            file_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizListResponse {
    pub ok: bool,
    pub quizzes: Vec<Quiz>,
}

#[derive(Debug, Serialize)]
pub struct AttemptResponse {
    pub ok: bool,
    pub attempt: Attempt,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub ok: bool,
    pub chat: Chat,
}

#[derive(Debug, Serialize)]
pub struct ChatListResponse {
    pub ok: bool,
    pub chats: Vec<Chat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_response_derives_file_url() {
        let mut quiz = Quiz::new("T".to_string(), "D".to_string(), vec![]);
        quiz.file_path = Some("abc123.pdf".to_string());

        let response = QuizResponse::new(quiz);

        assert!(response.ok);
        assert_eq!(response.file_url.as_deref(), Some("/uploads/abc123.pdf"));
    }

    #[test]
    fn test_quiz_response_omits_file_url_without_file() {
        let quiz = Quiz::new("T".to_string(), "D".to_string(), vec![]);
        let response = QuizResponse::new(quiz);

        assert!(response.file_url.is_none());
        let json = serde_json::to_value(&response).expect("response should serialize");
        assert!(json.get("fileUrl").is_none());
    }
}
