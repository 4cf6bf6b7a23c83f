use std::sync::Arc;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Quiz,
    repositories::QuizRepository,
    services::{
        generation_client::{GenerationClient, GenerationRequest},
        normalizer, prompt,
    },
};

/// Non-source metadata accompanying a generation request.
#[derive(Debug, Clone, Default)]
pub struct GenerateQuizOptions {
    pub prompt: Option<String>,
    pub teacher_id: Option<String>,
    pub course_id: Option<String>,
    pub file_path: Option<String>,
    pub source_kind: Option<String>,
}

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    generation: Arc<dyn GenerationClient>,
    model: String,
}

impl QuizService {
    pub fn new(
        repository: Arc<dyn QuizRepository>,
        generation: Arc<dyn GenerationClient>,
        model: String,
    ) -> Self {
        Self {
            repository,
            generation,
            model,
        }
    }

    /// Generate a quiz from extracted source text and persist it:
    /// prompt build, one generation call, normalization (including the
    /// hint pass), then create.
    pub async fn generate_from_text(
        &self,
        source_text: &str,
        options: GenerateQuizOptions,
    ) -> AppResult<Quiz> {
        if source_text.trim().is_empty() {
            return Err(AppError::MissingInput(
                "no readable text found in the uploaded document".to_string(),
            ));
        }

        let messages = prompt::build_quiz_messages(source_text, options.prompt.as_deref());
        let request = GenerationRequest {
            model: self.model.clone(),
            messages,
            temperature: Some(0.7),
            max_tokens: None,
            force_json: true,
        };

        let raw = self.generation.complete(request).await?;
        let generated =
            normalizer::normalize_quiz(&raw, self.generation.as_ref(), &self.model).await?;

        log::info!(
            "generated quiz '{}' with {} questions",
            generated.title,
            generated.questions.len()
        );

        let quiz = Quiz {
            id: Uuid::new_v4().to_string(),
            title: generated.title,
            description: generated.description,
            questions: generated.questions,
            file_path: options.file_path,
            metadata: options
                .source_kind
                .map(|kind| serde_json::json!({ "source": kind })),
            course_id: options.course_id,
            teacher_id: options.teacher_id,
            allowed_students: Vec::new(),
        };

        self.repository.create(quiz).await
    }

    /// Fetch a quiz for a student. When an allow-list is set, the email
    /// must be present on it (case-insensitive) or the request is
    /// forbidden.
    pub async fn get_quiz_for_student(&self, id: &str, email: Option<&str>) -> AppResult<Quiz> {
        let quiz = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;

        if !Self::is_student_allowed(&quiz, email) {
            return Err(AppError::Forbidden(
                "this quiz is restricted to listed students".to_string(),
            ));
        }

        Ok(quiz)
    }

    pub async fn list_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<Quiz>> {
        self.repository.list_by_teacher(teacher_id).await
    }

    pub fn is_student_allowed(quiz: &Quiz, email: Option<&str>) -> bool {
        if quiz.allowed_students.is_empty() {
            return true;
        }

        let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
            return false;
        };

        quiz.allowed_students
            .iter()
            .any(|allowed| allowed.trim().eq_ignore_ascii_case(email))
    }
}
