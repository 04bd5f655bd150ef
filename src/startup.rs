use crate::configuration::Settings;
use crate::connectors;
use crate::middleware;
use crate::routes;
use crate::services;
use actix_cors::Cors;
use actix_web::{dev::Server, error, http, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let cache_service = services::CacheService::new(&settings.redis.connection_string())
        .map(Arc::new)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;

    let product_service = web::Data::new(services::ProductService::new(
        pg_pool.clone(),
        cache_service.clone() as Arc<dyn services::ListingCacheInvalidator>,
    ));

    let weather_connector: web::Data<Arc<dyn connectors::WeatherConnector>> = web::Data::new(
        Arc::new(
            connectors::OpenWeatherClient::new(&settings.weather)
                .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?,
        ),
    );

    let oauth_http_client = reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    let oauth_http_client = web::Data::new(oauth_http_client);

    let oauth_cache = web::Data::new(middleware::authentication::OAuthCache::new(
        Duration::from_secs(60),
    ));

    let products_cache_ttl = Duration::from_secs(settings.cache.products_ttl_seconds);
    let weather_cache_ttl = Duration::from_secs(settings.cache.weather_ttl_seconds);

    let start_time = web::Data::new(routes::health_checks::StartTime(Instant::now()));

    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let msg: String = match err {
            error::JsonPayloadError::Deserialize(err) => format!(
                "{{\"kind\":\"deserialize\",\"line\":{}, \"column\":{}, \"msg\":\"{}\"}}",
                err.line(),
                err.column(),
                err
            ),
            _ => format!("{{\"kind\":\"other\",\"msg\":\"{}\"}}", err),
        };
        error::InternalError::new(msg, http::StatusCode::BAD_REQUEST).into()
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::authentication::Manager::new())
            .wrap(Cors::permissive())
            .service(routes::index_handler)
            .service(routes::health_check)
            .service(web::scope("/auth").service(routes::user::me_handler))
            .service(
                web::scope("/api/v1/products")
                    .wrap(middleware::cache::ResponseCache::new(
                        cache_service.clone(),
                        products_cache_ttl,
                    ))
                    .service(routes::product::list_handler)
                    .service(routes::product::item_handler)
                    .service(routes::product::add_handler)
                    .service(routes::product::update_handler)
                    .service(routes::product::delete_handler),
            )
            .service(
                web::scope("/api/v1/weather")
                    .wrap(middleware::cache::ResponseCache::new(
                        cache_service.clone(),
                        weather_cache_ttl,
                    ))
                    .service(routes::weather::get_handler),
            )
            .app_data(json_config.clone())
            .app_data(pg_pool.clone())
            .app_data(settings.clone())
            .app_data(product_service.clone())
            .app_data(weather_connector.clone())
            .app_data(oauth_http_client.clone())
            .app_data(oauth_cache.clone())
            .app_data(start_time.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
