use crate::services::CacheService;
use actix_web::body::{self, BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ErrorInternalServerError;
use actix_web::http::Method;
use actix_web::{Error, HttpResponse};
use futures::{
    future::{FutureExt, LocalBoxFuture},
    task::{Context, Poll},
};
use std::cell::RefCell;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

/// Serves successful GET responses from Redis, keyed by full path+query.
/// A cache that is down or slow degrades to a pass-through.
pub struct ResponseCache {
    cache: Arc<CacheService>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(cache: Arc<CacheService>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ResponseCache
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ResponseCacheMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ResponseCacheMiddleware {
            service: Rc::new(RefCell::new(service)),
            cache: self.cache.clone(),
            ttl: self.ttl,
        }))
    }
}

pub struct ResponseCacheMiddleware<S> {
    service: Rc<RefCell<S>>,
    cache: Arc<CacheService>,
    ttl: Duration,
}

impl<S, B> Service<ServiceRequest> for ResponseCacheMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        if let Ok(mut service) = self.service.try_borrow_mut() {
            service.poll_ready(ctx)
        } else {
            Poll::Pending
        }
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let cache = self.cache.clone();
        let ttl = self.ttl;

        async move {
            if req.method() != Method::GET {
                let fut = service.borrow_mut().call(req);
                return fut.await.map(|res| res.map_into_boxed_body());
            }

            let key = CacheService::response_key(&request_uri(&req));

            match cache.get_response(&key).await {
                Ok(Some(cached)) => {
                    tracing::debug!("cache hit for {:?}", key);
                    let (http_req, _payload) = req.into_parts();
                    let response = HttpResponse::Ok()
                        .content_type("application/json")
                        .body(cached);
                    return Ok(ServiceResponse::new(http_req, response));
                }
                Ok(None) => {}
                Err(err) => tracing::warn!("cache lookup failed: {}", err),
            }

            let fut = service.borrow_mut().call(req);
            let res = fut.await?;
            if !res.status().is_success() {
                return Ok(res.map_into_boxed_body());
            }

            let (http_req, res) = res.into_parts();
            let (res_head, res_body) = res.into_parts();
            let bytes = body::to_bytes(res_body)
                .await
                .map_err(|_| ErrorInternalServerError("failed to buffer response body"))?;

            if let Ok(text) = std::str::from_utf8(&bytes) {
                if let Err(err) = cache.store_response(&key, text, ttl).await {
                    tracing::warn!("cache store failed: {}", err);
                }
            }

            let res = res_head.set_body(BoxBody::new(bytes));
            Ok(ServiceResponse::new(http_req, res))
        }
        .boxed_local()
    }
}

fn request_uri(req: &ServiceRequest) -> String {
    match req.query_string() {
        "" => req.path().to_string(),
        query => format!("{}?{}", req.path(), query),
    }
}
