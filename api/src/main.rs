use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;

use av_api::app::create_app;
use av_api::routes::user::AppState;
use av_api::telemetry::init_tracing;
use av_core::repositories::{AccountRepository, InMemoryAccountRepository};
use av_core::services::verification::{
    AccountVerificationService, MailSender, VerificationServiceConfig,
};
use av_infra::database::{DatabasePool, MySqlAccountRepository};
use av_infra::mail::create_mail_sender;
use av_shared::config::{AppConfig, Environment, StoreBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Environment-specific file first; values already set are never overridden
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    init_tracing(&config.logging)?;
    config.validate().context("invalid configuration")?;

    tracing::info!(
        environment = %config.environment,
        store = ?config.store,
        mail_provider = ?config.mail.provider,
        "Starting account verification API server"
    );

    let mail_sender = Arc::new(create_mail_sender(&config.mail)?);

    match config.store {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory account store; accounts are lost on restart");
            serve(&config, Arc::new(InMemoryAccountRepository::new()), mail_sender).await
        }
        StoreBackend::MySql => {
            let pool = DatabasePool::new(config.database.clone())
                .await
                .context("failed to connect to the database")?;
            if config.database.auto_migrate {
                pool.ensure_schema().await?;
            }

            let repository = Arc::new(MySqlAccountRepository::new(pool.get_pool().clone()));
            let result = serve(&config, repository, mail_sender).await;

            pool.close().await;
            result
        }
    }
}

/// Wire the service and run the HTTP server until shutdown
async fn serve<R, M>(config: &AppConfig, repository: Arc<R>, mail_sender: Arc<M>) -> anyhow::Result<()>
where
    R: AccountRepository + 'static,
    M: MailSender + 'static,
{
    let service = Arc::new(AccountVerificationService::new(
        repository,
        mail_sender,
        VerificationServiceConfig::default(),
    ));
    let app_state = web::Data::new(AppState::new(service));

    let cors_config = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;
    let bind_address = config.server.bind_address();

    tracing::info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), &cors_config, max_payload_size)
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
