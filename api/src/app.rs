//! Application factory
//!
//! Builds the Actix-web application from shared state and configuration.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use av_core::repositories::AccountRepository;
use av_core::services::verification::MailSender;
use av_shared::config::CorsConfig;
use av_shared::types::{HealthResponse, HealthStatus};

use crate::handlers::error::{json_error_handler, not_found};
use crate::middleware::cors::create_cors;
use crate::routes::user::{check_verification, register, verify_email, AppState};

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "account-verify-api";

/// Register the account routes and the health check
pub fn configure_routes<R, M>(cfg: &mut web::ServiceConfig)
where
    R: AccountRepository + 'static,
    M: MailSender + 'static,
{
    cfg.route("/health", web::get().to(health_check::<R, M>)).service(
        web::scope("/user")
            .route("/register", web::post().to(register::<R, M>))
            .route(
                "/verify-email/{username}/{token}",
                web::get().to(verify_email::<R, M>),
            )
            .route(
                "/check-verification/{username}",
                web::get().to(check_verification::<R, M>),
            ),
    );
}

/// Create and configure the application with all dependencies
pub fn create_app<R, M>(
    app_state: web::Data<AppState<R, M>>,
    cors_config: &CorsConfig,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: AccountRepository + 'static,
    M: MailSender + 'static,
{
    let json_config = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // Request spans outermost so CORS rejections are traced too
        .wrap(create_cors(cors_config))
        .wrap(TracingLogger::default())
        .configure(configure_routes::<R, M>)
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
///
/// Reports `unhealthy` with 503 when the account store cannot be reached.
async fn health_check<R, M>(state: web::Data<AppState<R, M>>) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: MailSender + 'static,
{
    let version = env!("CARGO_PKG_VERSION");

    match state.verification_service.store_health().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse::healthy(SERVICE_NAME, version)),
        Err(e) => {
            tracing::warn!(error = %e, event = "health_check_failed", "Account store unreachable");
            HttpResponse::ServiceUnavailable().json(HealthResponse::new(
                HealthStatus::Unhealthy,
                SERVICE_NAME,
                version,
            ))
        }
    }
}
