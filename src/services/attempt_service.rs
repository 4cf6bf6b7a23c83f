use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::Attempt, dto::request::SaveAttemptRequest},
    repositories::AttemptRepository,
};

pub struct AttemptService {
    repository: Arc<dyn AttemptRepository>,
}

impl AttemptService {
    pub fn new(repository: Arc<dyn AttemptRepository>) -> Self {
        Self { repository }
    }

    /// Merge an incoming (possibly partial) save into the stored attempt
    /// and upsert the result. The read-merge-write is not transactional;
    /// the storage-level upsert replaces the whole document.
    pub async fn save_attempt(&self, request: SaveAttemptRequest) -> AppResult<Attempt> {
        request.validate()?;

        let existing = self.repository.find(&request.quiz_id, &request.email).await?;
        let merged = Self::merge(existing, &request, Utc::now());

        self.repository.upsert(merged).await
    }

    pub async fn get_attempt(&self, quiz_id: &str, email: &str) -> AppResult<Attempt> {
        self.repository
            .find(quiz_id, email)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No attempt for quiz '{}' and email '{}'",
                    quiz_id, email
                ))
            })
    }

    /// Reconcile an incoming payload with the stored attempt. Additive and
    /// last-non-empty-wins per key: null answer values are skipped,
    /// whitespace-only answer strings are skipped, null progress values
    /// are skipped. Score, total and the submitted flag always come from
    /// the incoming payload. Idempotent for repeated identical payloads.
    pub fn merge(
        existing: Option<Attempt>,
        incoming: &SaveAttemptRequest,
        submitted_at: DateTime<Utc>,
    ) -> Attempt {
        let mut attempt = existing
            .unwrap_or_else(|| Attempt::empty(&incoming.quiz_id, &incoming.email, submitted_at));

        if let Some(answers) = &incoming.answers {
            for (key, value) in answers {
                if !is_blank_answer(value) {
                    attempt.answers.insert(key.clone(), value.clone());
                }
            }
        }

        // Flat q<N> keys apply after the nested map, so they win on overlap.
        for (key, value) in incoming.flat_answer_entries() {
            if !is_blank_answer(value) {
                attempt.answers.insert(key.clone(), value.clone());
            }
        }

        if let Some(progress) = &incoming.progress {
            for (key, value) in progress {
                if !value.is_null() {
                    attempt.progress.insert(key.clone(), value.clone());
                }
            }
        }

        attempt.score = incoming.score;
        attempt.total_questions = incoming.total_questions;
        attempt.submitted = incoming.submitted;
        attempt.submitted_at = submitted_at;

        attempt
    }
}

fn is_blank_answer(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn request(body: serde_json::Value) -> SaveAttemptRequest {
        serde_json::from_value(body).expect("request should deserialize")
    }

    fn base_body() -> serde_json::Value {
        json!({
            "quizId": "quiz-1",
            "email": "student@example.com",
            "score": 2,
            "totalQuestions": 5,
            "submitted": false
        })
    }

    #[test]
    fn merge_creates_attempt_when_none_exists() {
        let mut body = base_body();
        body["answers"] = json!({ "q1": "A" });

        let merged = AttemptService::merge(None, &request(body), Utc::now());

        assert_eq!(merged.quiz_id, "quiz-1");
        assert_eq!(merged.answers.get("q1"), Some(&json!("A")));
        assert_eq!(merged.score, 2);
        assert_eq!(merged.total_questions, 5);
        assert!(!merged.submitted);
    }

    #[test]
    fn merge_is_idempotent_for_repeated_payloads() {
        let mut body = base_body();
        body["answers"] = json!({ "q1": "A", "q2": "B" });
        body["progress"] = json!({ "q1": 10 });
        let incoming = request(body);
        let now = Utc::now();

        let once = AttemptService::merge(None, &incoming, now);
        let twice = AttemptService::merge(Some(once.clone()), &incoming, now);

        assert_eq!(once, twice);
    }

    #[test]
    fn empty_string_never_clobbers_a_saved_answer() {
        let mut existing = Attempt::empty("quiz-1", "student@example.com", Utc::now());
        existing.answers.insert("q1".to_string(), json!("A"));

        let mut body = base_body();
        body["answers"] = json!({ "q1": "   " });

        let merged = AttemptService::merge(Some(existing), &request(body), Utc::now());
        assert_eq!(merged.answers.get("q1"), Some(&json!("A")));
    }

    #[test]
    fn null_never_clobbers_a_saved_answer() {
        let mut existing = Attempt::empty("quiz-1", "student@example.com", Utc::now());
        existing.answers.insert("q1".to_string(), json!("A"));

        let mut body = base_body();
        body["answers"] = json!({ "q1": null });

        let merged = AttemptService::merge(Some(existing), &request(body), Utc::now());
        assert_eq!(merged.answers.get("q1"), Some(&json!("A")));
    }

    #[test]
    fn non_empty_value_overwrites_a_saved_answer() {
        let mut existing = Attempt::empty("quiz-1", "student@example.com", Utc::now());
        existing.answers.insert("q1".to_string(), json!("A"));

        let mut body = base_body();
        body["answers"] = json!({ "q1": "B" });

        let merged = AttemptService::merge(Some(existing), &request(body), Utc::now());
        assert_eq!(merged.answers.get("q1"), Some(&json!("B")));
    }

    #[test]
    fn progress_skips_null_but_accepts_empty_string() {
        let mut existing = Attempt::empty("quiz-1", "student@example.com", Utc::now());
        existing.progress.insert("p1".to_string(), json!(5));
        existing.progress.insert("p2".to_string(), json!("started"));

        let mut body = base_body();
        body["progress"] = json!({ "p1": null, "p2": "" });

        let merged = AttemptService::merge(Some(existing), &request(body), Utc::now());

        assert_eq!(merged.progress.get("p1"), Some(&json!(5)));
        // Progress has no empty-string exclusion, only null is skipped.
        assert_eq!(merged.progress.get("p2"), Some(&json!("")));
    }

    #[test]
    fn flat_question_keys_are_merged_as_answers() {
        let mut body = base_body();
        body["q1"] = json!("C");
        body["q2"] = json!(" ");
        body["notAKey"] = json!("ignored");

        let merged = AttemptService::merge(None, &request(body), Utc::now());

        assert_eq!(merged.answers.get("q1"), Some(&json!("C")));
        assert!(merged.answers.get("q2").is_none());
        assert!(merged.answers.get("notAKey").is_none());
    }

    #[test]
    fn flat_key_wins_over_nested_map_on_overlap() {
        let mut body = base_body();
        body["answers"] = json!({ "q1": "nested" });
        body["q1"] = json!("flat");

        let merged = AttemptService::merge(None, &request(body), Utc::now());
        assert_eq!(merged.answers.get("q1"), Some(&json!("flat")));
    }

    #[test]
    fn scalar_fields_always_come_from_the_incoming_payload() {
        let mut existing = Attempt::empty("quiz-1", "student@example.com", Utc::now());
        existing.score = 4;
        existing.total_questions = 5;
        existing.submitted = true;

        let merged = AttemptService::merge(Some(existing), &request(base_body()), Utc::now());

        assert_eq!(merged.score, 2);
        assert_eq!(merged.total_questions, 5);
        // submitted is not enforced one-way; the incoming flag wins.
        assert!(!merged.submitted);
    }

    #[test]
    fn merge_keeps_unmentioned_keys() {
        let mut existing = Attempt::empty("quiz-1", "student@example.com", Utc::now());
        existing.answers.insert("q1".to_string(), json!("A"));
        existing.answers.insert("q9".to_string(), json!("Z"));

        let mut body = base_body();
        body["answers"] = json!({ "q1": "B" });

        let merged = AttemptService::merge(Some(existing), &request(body), Utc::now());

        assert_eq!(merged.answers.get("q1"), Some(&json!("B")));
        assert_eq!(merged.answers.get("q9"), Some(&json!("Z")));
    }

    #[test]
    fn empty_request_maps_are_harmless() {
        let mut body = base_body();
        body["answers"] = serde_json::to_value(HashMap::<String, Value>::new()).unwrap();

        let merged = AttemptService::merge(None, &request(body), Utc::now());
        assert!(merged.answers.is_empty());
    }
}
