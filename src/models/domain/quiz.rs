use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A quiz as generated from source material and served to students.
/// Field names are camelCase on the wire and in storage.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub allowed_students: Vec<String>,
}

/// A single multiple-choice question. `correct_answer` is a zero-based
/// index into `options`; normalization guarantees it is in range.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub hint: String,
}

impl Quiz {
    pub fn new(title: String, description: String, questions: Vec<QuizQuestion>) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            questions,
            file_path: None,
            metadata: None,
            course_id: None,
            teacher_id: None,
            allowed_students: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_serializes_with_camel_case_keys() {
        let mut quiz = Quiz::new("Cells".to_string(), "Biology basics".to_string(), vec![]);
        quiz.allowed_students = vec!["a@x.com".to_string()];
        quiz.file_path = Some("abc.pdf".to_string());

        let json = serde_json::to_value(&quiz).expect("quiz should serialize");

        assert!(json.get("allowedStudents").is_some());
        assert!(json.get("filePath").is_some());
        assert!(json.get("allowed_students").is_none());
    }

    #[test]
    fn quiz_question_defaults_missing_fields() {
        let parsed: QuizQuestion = serde_json::from_str(
            r#"{"question":"What is a cell?","options":["A","B","C"],"correctAnswer":1}"#,
        )
        .expect("question should deserialize");

        assert_eq!(parsed.correct_answer, 1);
        assert!(parsed.id.is_empty());
        assert!(parsed.explanation.is_empty());
        assert!(parsed.hint.is_empty());
    }

    #[test]
    fn quiz_round_trip_preserves_questions() {
        let quiz = Quiz::new(
            "Quiz".to_string(),
            "Desc".to_string(),
            vec![QuizQuestion {
                id: "q1".to_string(),
                question: "Pick one".to_string(),
                options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
                correct_answer: 2,
                explanation: "C is right".to_string(),
                hint: "".to_string(),
            }],
        );

        let json = serde_json::to_string(&quiz).expect("quiz should serialize");
        let parsed: Quiz = serde_json::from_str(&json).expect("quiz should deserialize");

        assert_eq!(parsed, quiz);
        assert_eq!(parsed.questions[0].correct_answer, 2);
    }
}
