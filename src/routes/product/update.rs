use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::{ProductError, ProductService};
use actix_web::{put, web, Responder, Result};
use serde_valid::Validate;
use std::sync::Arc;
use uuid::Uuid;

#[tracing::instrument(name = "Update product.", skip_all)]
#[put("/{id}")]
pub async fn update_handler(
    path: web::Path<(Uuid,)>,
    _user: web::ReqData<Arc<models::User>>,
    form: web::Json<forms::product::Update>,
    product_service: web::Data<ProductService>,
) -> Result<impl Responder> {
    let id = path.into_inner().0;

    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Product>::build().form_error(errors.to_string()));
    }

    product_service
        .update_product(id, form)
        .await
        .map(|product| JsonResponse::build().set_item(product).ok("success"))
        .map_err(|err| match err {
            ProductError::NotFound => {
                JsonResponse::<models::Product>::build().not_found(err.to_string())
            }
            ProductError::Validation { .. } => {
                JsonResponse::<models::Product>::build().bad_request(err.to_string())
            }
            err => {
                tracing::error!("Failed to update product: {:?}", err);
                JsonResponse::<models::Product>::build().internal_server_error("")
            }
        })
}
