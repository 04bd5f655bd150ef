use crate::connectors;
use crate::helpers::JsonResponse;
use actix_web::{get, web, Responder, Result};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
}

#[tracing::instrument(name = "Get weather.", skip_all)]
#[get("")]
pub async fn get_handler(
    query: web::Query<WeatherQuery>,
    connector: web::Data<Arc<dyn connectors::WeatherConnector>>,
) -> Result<impl Responder> {
    let city = match query.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(city) => city.to_string(),
        None => {
            return Err(JsonResponse::<Value>::build().bad_request("Please provide a city name"))
        }
    };

    let data = connector.current_by_city(&city).await?;

    Ok(JsonResponse::build().set_item(data).ok("OK"))
}
