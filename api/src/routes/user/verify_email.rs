use actix_web::{web, HttpResponse};

use av_core::repositories::AccountRepository;
use av_core::services::verification::MailSender;
use av_shared::types::MessageResponse;

use crate::handlers::error::domain_error_response;

use super::AppState;

/// Handler for GET /user/verify-email/{username}/{token}
///
/// ## Success (200 OK)
/// ```json
/// { "message": "Email verified successfully" }
/// ```
///
/// ## Errors
/// - 404 `USER_NOT_FOUND`
/// - 400 `INVALID_TOKEN`
pub async fn verify_email<R, M>(
    state: web::Data<AppState<R, M>>,
    path: web::Path<(String, String)>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: MailSender + 'static,
{
    let (username, token) = path.into_inner();

    match state.verification_service.verify_email(&username, &token).await {
        Ok(result) => HttpResponse::Ok().json(MessageResponse::new(result.message())),
        Err(error) => domain_error_response(&error),
    }
}
