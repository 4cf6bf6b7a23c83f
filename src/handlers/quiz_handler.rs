use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse};
use futures::TryStreamExt;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    models::dto::{
        request::{QuizListQuery, QuizQuery},
        response::{QuizListResponse, QuizResponse},
    },
    services::quiz_service::GenerateQuizOptions,
};

#[post("/api/parse-image")]
pub async fn parse_image(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let upload = read_quiz_upload(payload).await?;
    let stored_name = state.uploads.save(&upload.file_name, &upload.bytes).await?;

    let text = state
        .extractor
        .extract_image(&state.uploads.path_of(&stored_name))
        .await?;

    let quiz = state
        .quiz_service
        .generate_from_text(&text, upload.into_options(stored_name, "image"))
        .await?;

    Ok(HttpResponse::Ok().json(QuizResponse::new(quiz)))
}

#[post("/api/parse-pdf")]
pub async fn parse_pdf(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let upload = read_quiz_upload(payload).await?;
    let stored_name = state.uploads.save(&upload.file_name, &upload.bytes).await?;

    let text = state
        .extractor
        .extract_pdf(&state.uploads.path_of(&stored_name))
        .await?;

    let quiz = state
        .quiz_service
        .generate_from_text(&text, upload.into_options(stored_name, "pdf"))
        .await?;

    Ok(HttpResponse::Ok().json(QuizResponse::new(quiz)))
}

#[get("/api/quizzes/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<QuizQuery>,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .get_quiz_for_student(&id, query.email.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(QuizResponse::new(quiz)))
}

#[get("/api/quizzes")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    query: web::Query<QuizListQuery>,
) -> Result<HttpResponse, AppError> {
    let teacher_id = query
        .teacher_id
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::MissingInput("query parameter 'teacherId' is required".to_string())
        })?;

    let quizzes = state.quiz_service.list_by_teacher(teacher_id).await?;
    Ok(HttpResponse::Ok().json(QuizListResponse { ok: true, quizzes }))
}

struct QuizUpload {
    bytes: Vec<u8>,
    file_name: String,
    prompt: Option<String>,
    teacher_id: Option<String>,
    course_id: Option<String>,
}

impl QuizUpload {
    fn into_options(self, stored_name: String, source_kind: &str) -> GenerateQuizOptions {
        GenerateQuizOptions {
            prompt: self.prompt,
            teacher_id: self.teacher_id,
            course_id: self.course_id,
            file_path: Some(stored_name),
            source_kind: Some(source_kind.to_string()),
        }
    }
}

fn multipart_err(err: impl std::fmt::Display) -> AppError {
    AppError::MissingInput(format!("malformed multipart payload: {}", err))
}

async fn read_quiz_upload(mut payload: Multipart) -> AppResult<QuizUpload> {
    let mut upload = QuizUpload {
        bytes: Vec::new(),
        file_name: String::new(),
        prompt: None,
        teacher_id: None,
        course_id: None,
    };

    while let Some(mut field) = payload.try_next().await.map_err(multipart_err)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                upload.file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .unwrap_or("upload")
                    .to_string();
                while let Some(chunk) = field.try_next().await.map_err(multipart_err)? {
                    upload.bytes.extend_from_slice(&chunk);
                }
            }
            "prompt" | "teacherId" | "courseId" => {
                let text = read_text_field(&mut field).await?;
                match name.as_str() {
                    "prompt" => upload.prompt = Some(text),
                    "teacherId" => upload.teacher_id = Some(text),
                    _ => upload.course_id = Some(text),
                }
            }
            _ => {
                // Unknown fields are drained and ignored.
                while field.try_next().await.map_err(multipart_err)?.is_some() {}
            }
        }
    }

    if upload.bytes.is_empty() {
        return Err(AppError::MissingInput(
            "multipart field 'file' is required".to_string(),
        ));
    }

    Ok(upload)
}

async fn read_text_field(field: &mut actix_multipart::Field) -> AppResult<String> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(multipart_err)? {
        bytes.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
