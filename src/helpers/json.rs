use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{Error, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

/// The response envelope every handler answers with.
#[derive(Serialize)]
pub struct JsonResponse<T> {
    pub(crate) status: String,
    pub(crate) message: String,
    pub(crate) code: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) list: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) total: Option<i64>,
}

#[derive(Default)]
pub struct JsonResponseBuilder<T>
where
    T: Serialize + Default,
{
    id: Option<Uuid>,
    item: Option<T>,
    list: Option<Vec<T>>,
    total: Option<i64>,
}

impl<T> JsonResponse<T>
where
    T: Serialize + Default,
{
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}

impl<T> JsonResponseBuilder<T>
where
    T: Serialize + Default,
{
    pub fn set_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    pub fn set_total(mut self, total: i64) -> Self {
        self.total = Some(total);
        self
    }

    fn payload(self, status: &str, message: String, code: u32) -> JsonResponse<T> {
        let results = self.list.as_ref().map(Vec::len);

        JsonResponse {
            status: status.to_string(),
            message,
            code,
            id: self.id,
            item: self.item,
            list: self.list,
            results,
            total: self.total,
        }
    }

    pub fn ok(self, message: impl Into<String>) -> HttpResponse {
        HttpResponse::Ok().json(self.payload("OK", message.into(), 200))
    }

    pub fn created(self, message: impl Into<String>) -> HttpResponse {
        HttpResponse::Created().json(self.payload("OK", message.into(), 201))
    }

    fn error(self, status: StatusCode, message: String) -> Error {
        let payload = self.payload("Error", message.clone(), status.as_u16() as u32);
        InternalError::from_response(message, HttpResponse::build(status).json(payload)).into()
    }

    pub fn bad_request(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::BAD_REQUEST, message.into())
    }

    pub fn form_error(self, errors: impl ToString) -> Error {
        self.error(StatusCode::BAD_REQUEST, errors.to_string())
    }

    pub fn unauthorized(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::UNAUTHORIZED, message.into())
    }

    pub fn not_found(self, message: impl Into<String>) -> Error {
        self.error(StatusCode::NOT_FOUND, message.into())
    }

    pub fn internal_server_error(self, message: impl Into<String>) -> Error {
        let message = match message.into() {
            msg if msg.trim().is_empty() => "Internal Server Error".to_string(),
            msg => msg,
        };
        self.error(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_payload_counts_results() {
        let payload = JsonResponse::<i32>::build()
            .set_list(vec![1, 2, 3])
            .set_total(42)
            .payload("OK", "OK".to_string(), 200);

        assert_eq!(payload.results, Some(3));
        assert_eq!(payload.total, Some(42));

        let body = serde_json::to_value(&payload).expect("serializable");
        assert_eq!(body["results"], 3);
        assert_eq!(body["total"], 42);
        assert!(body.get("item").is_none());
    }

    #[test]
    fn item_payload_skips_listing_fields() {
        let payload = JsonResponse::<i32>::build()
            .set_item(7)
            .payload("OK", "OK".to_string(), 200);

        let body = serde_json::to_value(&payload).expect("serializable");
        assert_eq!(body["item"], 7);
        assert!(body.get("list").is_none());
        assert!(body.get("results").is_none());
        assert!(body.get("total").is_none());
    }
}
