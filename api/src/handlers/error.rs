//! Conversion of domain and request errors into HTTP responses

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use av_core::errors::DomainError;
use av_shared::errors::{error_codes, ErrorResponse};

/// HTTP status and error code for a domain error
pub fn status_and_code(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::DuplicateIdentity { .. } => (StatusCode::BAD_REQUEST, error_codes::DUPLICATE_IDENTITY),
        DomainError::DeliveryFailure { .. } => (StatusCode::BAD_REQUEST, error_codes::DELIVERY_FAILURE),
        DomainError::InvalidToken => (StatusCode::BAD_REQUEST, error_codes::INVALID_TOKEN),
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, error_codes::USER_NOT_FOUND),
        DomainError::Unavailable { .. } => (StatusCode::SERVICE_UNAVAILABLE, error_codes::SERVICE_UNAVAILABLE),
        DomainError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// Client errors carry the domain message. Server errors get a generic
/// message; the detail only goes to the log.
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    let (status, code) = status_and_code(error);

    let message = match error {
        DomainError::Unavailable { .. } => {
            tracing::error!(error = %error, "Dependency unavailable");
            "Service temporarily unavailable".to_string()
        }
        DomainError::Internal { .. } => {
            tracing::error!(error = %error, "Internal error");
            "An internal error occurred".to_string()
        }
        _ => {
            tracing::debug!(error = %error, code = code, "Request rejected");
            error.to_string()
        }
    };

    HttpResponse::build(status).json(ErrorResponse::new(status.as_u16(), code, message))
}

/// 400 response listing every invalid field
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut messages = Vec::new();
    let mut response = ErrorResponse::new(400, error_codes::VALIDATION_ERROR, "");

    for (field, field_errors) in errors.field_errors() {
        let field_messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        messages.extend(field_messages.iter().cloned());
        response = response.add_detail(field.to_string(), field_messages);
    }

    messages.sort();
    response.message = messages.join("; ");

    HttpResponse::BadRequest().json(response)
}

/// JSON extractor error handler: malformed bodies become 400 `VALIDATION_ERROR`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");

    let status = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        _ => StatusCode::BAD_REQUEST,
    };
    let body = ErrorResponse::new(status.as_u16(), error_codes::VALIDATION_ERROR, err.to_string());
    let response = HttpResponse::build(status).json(body);

    actix_web::error::InternalError::from_response(err, response).into()
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        404,
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
