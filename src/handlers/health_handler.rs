use actix_web::{get, HttpResponse};
use serde_json::json;

#[get("/api/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "ok": true }))
}
