use crate::helpers::JsonResponse;
use crate::models;
use crate::services::{ProductError, ProductService};
use actix_web::{delete, web, Responder, Result};
use std::sync::Arc;
use uuid::Uuid;

#[tracing::instrument(name = "Delete product.", skip_all)]
#[delete("/{id}")]
pub async fn delete_handler(
    path: web::Path<(Uuid,)>,
    _user: web::ReqData<Arc<models::User>>,
    product_service: web::Data<ProductService>,
) -> Result<impl Responder> {
    let id = path.into_inner().0;

    product_service
        .delete_product(id)
        .await
        .map(|_| JsonResponse::<models::Product>::build().ok("Deleted"))
        .map_err(|err| match err {
            ProductError::NotFound => {
                JsonResponse::<models::Product>::build().not_found(err.to_string())
            }
            err => {
                tracing::error!("Failed to delete product: {:?}", err);
                JsonResponse::<models::Product>::build().internal_server_error("")
            }
        })
}
