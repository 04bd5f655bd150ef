use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use crate::services::{ProductError, ProductService};
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use std::sync::Arc;

#[tracing::instrument(name = "Add product.", skip_all)]
#[post("")]
pub async fn add_handler(
    user: web::ReqData<Arc<models::User>>,
    form: web::Json<forms::product::Add>,
    product_service: web::Data<ProductService>,
) -> Result<impl Responder> {
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        let err_msg = format!("Invalid data received {:?}", errors.to_string());
        tracing::debug!(err_msg);

        return Err(JsonResponse::<models::Product>::build().form_error(errors.to_string()));
    }

    product_service
        .create_product(form, user.id)
        .await
        .map(|product| {
            JsonResponse::build()
                .set_id(product.id)
                .set_item(product)
                .created("Saved")
        })
        .map_err(|err| match err {
            ProductError::Validation { .. } => {
                JsonResponse::<models::Product>::build().bad_request(err.to_string())
            }
            err => {
                tracing::error!("Failed to create product: {:?}", err);
                JsonResponse::<models::Product>::build().internal_server_error("")
            }
        })
}
