use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{AttemptQuery, SaveAttemptRequest},
        response::AttemptResponse,
    },
};

#[post("/api/attempts")]
pub async fn save_attempt(
    state: web::Data<AppState>,
    request: web::Json<SaveAttemptRequest>,
) -> Result<HttpResponse, AppError> {
    let attempt = state
        .attempt_service
        .save_attempt(request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(AttemptResponse { ok: true, attempt }))
}

#[get("/api/attempts")]
pub async fn get_attempt(
    state: web::Data<AppState>,
    query: web::Query<AttemptQuery>,
) -> Result<HttpResponse, AppError> {
    let quiz_id = query
        .quiz_id
        .as_deref()
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            AppError::MissingInput("query parameter 'quizId' is required".to_string())
        })?;
    let email = query
        .email
        .as_deref()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| {
            AppError::MissingInput("query parameter 'email' is required".to_string())
        })?;

    let attempt = state.attempt_service.get_attempt(quiz_id, email).await?;
    Ok(HttpResponse::Ok().json(AttemptResponse { ok: true, attempt }))
}
