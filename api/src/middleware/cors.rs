//! CORS middleware configuration for cross-origin requests.
//!
//! Origins come from [`CorsConfig`]: `*` (the development default) allows
//! any origin, otherwise only the listed origins are accepted.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use av_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::info!("Configuring permissive CORS");
        return cors.allow_any_origin();
    }

    tracing::info!(origins = ?config.allowed_origins, "Configuring CORS for listed origins");

    let cors = config
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin));

    if config.allow_credentials {
        cors.supports_credentials()
    } else {
        cors
    }
}
