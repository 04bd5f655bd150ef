use actix_web::{get, web, Responder, Result};
use serde_json::json;

#[get("/")]
pub async fn index_handler() -> Result<impl Responder> {
    Ok(web::Json(json!({
        "status": "success",
        "message": "Welcome to the Farmlok Backend API",
        "endpoints": {
            "auth": {
                "me": "/auth/me"
            },
            "products": {
                "all": "/api/v1/products",
                "single": "/api/v1/products/{id}"
            },
            "weather": {
                "search": "/api/v1/weather?city={cityName}"
            },
            "system": {
                "health": "/health"
            }
        }
    })))
}
