use actix_web::{get, web, Responder, Result};
use serde_json::json;
use std::time::Instant;

/// Recorded once at startup so /health can report uptime.
pub struct StartTime(pub Instant);

#[get("/health")]
pub async fn health_check(start_time: web::Data<StartTime>) -> Result<impl Responder> {
    Ok(web::Json(json!({
        "status": "OK",
        "uptime": start_time.0.elapsed().as_secs(),
    })))
}
