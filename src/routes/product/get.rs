use crate::helpers::JsonResponse;
use crate::models;
use crate::services::{ProductError, ProductService};
use crate::views;
use actix_web::{get, web, Responder, Result};
use std::collections::HashMap;
use uuid::Uuid;

#[tracing::instrument(name = "List products.", skip_all)]
#[get("")]
pub async fn list_handler(
    query: web::Query<HashMap<String, String>>,
    product_service: web::Data<ProductService>,
) -> Result<impl Responder> {
    let listing = product_service
        .list_products(&query)
        .await
        .map_err(|err| {
            tracing::error!("Failed to list products: {:?}", err);
            JsonResponse::<models::Product>::build().internal_server_error("")
        })?;

    Ok(JsonResponse::build()
        .set_total(listing.total)
        .set_list(listing.products)
        .ok("OK"))
}

#[tracing::instrument(name = "Get product.", skip_all)]
#[get("/{id}")]
pub async fn item_handler(
    path: web::Path<(Uuid,)>,
    product_service: web::Data<ProductService>,
) -> Result<impl Responder> {
    let id = path.into_inner().0;

    let (product, owner) = product_service.get_product(id).await.map_err(|err| match err {
        ProductError::NotFound => {
            JsonResponse::<views::product::Detail>::build().not_found(err.to_string())
        }
        err => {
            tracing::error!("Failed to fetch product: {:?}", err);
            JsonResponse::<views::product::Detail>::build().internal_server_error("")
        }
    })?;

    Ok(JsonResponse::build()
        .set_item(views::product::Detail::from((product, owner)))
        .ok("OK"))
}
