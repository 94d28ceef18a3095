use actix_web::{web, HttpResponse};
use validator::Validate;

use av_core::repositories::AccountRepository;
use av_core::services::verification::MailSender;
use av_shared::types::MessageResponse;
use av_shared::validation::mask_email;

use crate::dto::user::RegisterRequest;
use crate::handlers::error::{domain_error_response, validation_error_response};

use super::AppState;

/// Handler for POST /user/register
///
/// Creates an unverified account and emails it a verification token.
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "email": "alice@example.com" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// { "message": "User registered successfully" }
/// ```
///
/// ## Errors
/// - 400 `VALIDATION_ERROR`: malformed body or invalid fields
/// - 400 `DUPLICATE_IDENTITY`: "Username already exists" / "Email already exists"
/// - 400 `DELIVERY_FAILURE`: "Failed to send verification email"
/// - 503 `SERVICE_UNAVAILABLE`: the account store could not be reached
pub async fn register<R, M>(
    state: web::Data<AppState<R, M>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    R: AccountRepository + 'static,
    M: MailSender + 'static,
{
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        tracing::debug!(
            username = %request.username,
            email = %mask_email(&request.email),
            "Registration request failed validation"
        );
        return validation_error_response(&errors);
    }

    match state
        .verification_service
        .register(&request.username, &request.email)
        .await
    {
        Ok(result) => HttpResponse::Created().json(MessageResponse::new(result.message())),
        Err(error) => domain_error_response(&error),
    }
}
