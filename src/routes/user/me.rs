use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, web, Responder, Result};
use std::sync::Arc;

#[tracing::instrument(name = "Get current user.", skip_all)]
#[get("/me")]
pub async fn me_handler(user: Option<web::ReqData<Arc<models::User>>>) -> Result<impl Responder> {
    match user {
        Some(user) => {
            let user = user.into_inner().as_ref().clone();
            Ok(JsonResponse::build().set_item(user).ok("OK"))
        }
        None => Err(JsonResponse::<models::User>::build()
            .unauthorized("You are not logged in! Please log in to get access.")),
    }
}
