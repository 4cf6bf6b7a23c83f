use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A student's attempt at a quiz. Identity is the composite key
/// `quizId::email`; the record is created on first save and updated in
/// place by later partial saves, never deleted.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub quiz_id: String,
    pub email: String,
    #[serde(default)]
    pub answers: HashMap<String, Value>,
    #[serde(default)]
    pub progress: HashMap<String, Value>,
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub total_questions: i32,
    #[serde(default)]
    pub submitted: bool,
    pub submitted_at: DateTime<Utc>,
}

impl Attempt {
    pub fn empty(quiz_id: &str, email: &str, submitted_at: DateTime<Utc>) -> Self {
        Attempt {
            quiz_id: quiz_id.to_string(),
            email: email.to_string(),
            answers: HashMap::new(),
            progress: HashMap::new(),
            score: 0,
            total_questions: 0,
            submitted: false,
            submitted_at,
        }
    }

    pub fn key(&self) -> String {
        format!("{}::{}", self.quiz_id, self.email)
    }
}
