use actix_web::{web, HttpResponse};

use av_core::repositories::AccountRepository;
use av_core::services::verification::MailSender;
use av_shared::types::MessageResponse;

use crate::handlers::error::domain_error_response;

use super::AppState;

/// Handler for GET /user/check-verification/{username}
///
/// Answers 200 with "User is verified" or "User is not verified", or 404
/// `USER_NOT_FOUND`.
pub async fn check_verification<R, M>(
    state: web::Data<AppState<R, M>>,
    path: web::Path<String>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: MailSender + 'static,
{
    let username = path.into_inner();

    match state.verification_service.check_verification(&username).await {
        Ok(status) => HttpResponse::Ok().json(MessageResponse::new(status.message())),
        Err(error) => domain_error_response(&error),
    }
}
