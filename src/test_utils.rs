use crate::models::domain::{Attempt, Quiz, QuizQuestion};

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use chrono::Utc;

    /// Creates a standard three-option question
    pub fn test_question(id: &str) -> QuizQuestion {
        QuizQuestion {
            id: id.to_string(),
            question: format!("Question {}?", id),
            options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            correct_answer: 1,
            explanation: "B is supported by the source".to_string(),
            hint: String::new(),
        }
    }

    /// Creates a standard test quiz with two questions
    pub fn test_quiz() -> Quiz {
        Quiz::new(
            "Photosynthesis".to_string(),
            "Light-dependent reactions".to_string(),
            vec![test_question("q1"), test_question("q2")],
        )
    }

    /// Creates an attempt with one saved answer
    pub fn test_attempt() -> Attempt {
        let mut attempt = Attempt::empty("quiz-1", "student@example.com", Utc::now());
        attempt
            .answers
            .insert("q1".to_string(), serde_json::json!("A"));
        attempt.total_questions = 2;
        attempt
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_test_quiz() {
        let quiz = test_quiz();
        assert_eq!(quiz.questions.len(), 2);
        assert!(quiz.allowed_students.is_empty());
    }

    #[test]
    fn test_fixtures_test_attempt() {
        let attempt = test_attempt();
        assert_eq!(attempt.key(), "quiz-1::student@example.com");
        assert!(!attempt.submitted);
    }
}
