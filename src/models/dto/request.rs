use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use validator::Validate;

/// Flat-payload answer fields look like `q1`, `q42`: a literal `q`
/// followed by one or more digits.
static QUESTION_KEY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^q[0-9]+$").expect("QUESTION_KEY_REGEX is a valid regex pattern")
});

pub fn is_question_key(key: &str) -> bool {
    QUESTION_KEY_REGEX.is_match(key)
}

/// Body of `POST /api/attempts`. Answer entries may arrive nested under
/// `answers` and/or as top-level `q<N>` keys; both feed the merge.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveAttemptRequest {
    #[validate(length(min = 1))]
    pub quiz_id: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    pub score: i32,

    #[serde(default)]
    pub total_questions: i32,

    #[serde(default)]
    pub submitted: bool,

    #[serde(default)]
    pub answers: Option<HashMap<String, Value>>,

    #[serde(default)]
    pub progress: Option<HashMap<String, Value>>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl SaveAttemptRequest {
    /// Top-level keys matching the question-key pattern, treated as
    /// additional answer entries.
    pub fn flat_answer_entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.extra.iter().filter(|(k, _)| is_question_key(k))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AppendChatRequest {
    #[validate(length(min = 1, max = 32))]
    pub role: String,

    #[validate(length(min = 1, max = 20000))]
    pub text: String,

    #[serde(default)]
    pub meta: Option<Value>,

    #[validate(length(min = 1))]
    pub teacher_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptQuery {
    pub quiz_id: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizQuery {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizListQuery {
    pub teacher_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatQuery {
    pub teacher_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_question_key_pattern() {
        assert!(is_question_key("q1"));
        assert!(is_question_key("q42"));
        assert!(!is_question_key("q"));
        assert!(!is_question_key("qx"));
        assert!(!is_question_key("Q1"));
        assert!(!is_question_key("q1extra"));
        assert!(!is_question_key("answers"));
    }

    #[test]
    fn test_flat_answer_entries_only_picks_question_keys() {
        let body = json!({
            "quizId": "quiz-1",
            "email": "student@example.com",
            "score": 2,
            "totalQuestions": 5,
            "submitted": false,
            "q1": "A",
            "q2": "B",
            "clientVersion": "1.4.2"
        });

        let request: SaveAttemptRequest =
            serde_json::from_value(body).expect("request should deserialize");

        let mut keys: Vec<&str> = request
            .flat_answer_entries()
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();

        assert_eq!(keys, vec!["q1", "q2"]);
    }

    #[test]
    fn test_known_fields_are_not_captured_by_flatten() {
        let body = json!({
            "quizId": "quiz-1",
            "email": "student@example.com",
            "answers": { "q1": "A" }
        });

        let request: SaveAttemptRequest =
            serde_json::from_value(body).expect("request should deserialize");

        assert!(request.extra.get("quizId").is_none());
        assert!(request.extra.get("answers").is_none());
        assert_eq!(
            request.answers.as_ref().and_then(|a| a.get("q1")),
            Some(&json!("A"))
        );
    }

    #[test]
    fn test_save_attempt_request_validation() {
        let valid = SaveAttemptRequest {
            quiz_id: "quiz-1".to_string(),
            email: "student@example.com".to_string(),
            score: 0,
            total_questions: 0,
            submitted: false,
            answers: None,
            progress: None,
            extra: HashMap::new(),
        };
        assert!(valid.validate().is_ok());

        let invalid = SaveAttemptRequest {
            email: "not-an-email".to_string(),
            ..valid
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_append_chat_request_requires_text() {
        let request = AppendChatRequest {
            role: "user".to_string(),
            text: "".to_string(),
            meta: None,
            teacher_id: "teacher-1".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
