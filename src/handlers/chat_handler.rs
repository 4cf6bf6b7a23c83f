use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{AppendChatRequest, ChatQuery},
        response::{ChatListResponse, ChatResponse},
    },
};

#[post("/api/chats")]
pub async fn append_chat(
    state: web::Data<AppState>,
    request: web::Json<AppendChatRequest>,
) -> Result<HttpResponse, AppError> {
    let chat = state.chat_service.append(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ChatResponse { ok: true, chat }))
}

#[get("/api/chats")]
pub async fn list_chats(
    state: web::Data<AppState>,
    query: web::Query<ChatQuery>,
) -> Result<HttpResponse, AppError> {
    let teacher_id = query
        .teacher_id
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::MissingInput("query parameter 'teacherId' is required".to_string())
        })?;

    let chats = state.chat_service.list_by_teacher(teacher_id).await?;
    Ok(HttpResponse::Ok().json(ChatListResponse { ok: true, chats }))
}
