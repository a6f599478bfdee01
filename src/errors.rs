//! Request-boundary errors.
//!
//! Every failure on the request tier maps to one HTTP 400 response with
//! the body `{"error": <message>, "success": false}`, keeping the original
//! service's single catch-all contract. Startup failures live in
//! [`crate::model::ModelError`] instead and never reach this type.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A request field could not be coerced to the type the model needs.
    #[error("invalid value for `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The request-derived record does not line up with the columns the
    /// loaded model was trained on.
    #[error("input does not match the model schema: {0}")]
    SchemaMismatch(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        log::debug!("rejecting request: {self}");
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            success: false,
        })
    }
}

/// Shape malformed JSON payloads like every other client error instead of
/// actix's default plain-text body.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: err.to_string(),
        success: false,
    });
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_the_field() {
        let err = ApiError::Validation {
            field: "age",
            reason: "`abc` is not an integer".into(),
        };
        assert!(err.to_string().contains("age"));
        assert!(err.to_string().contains("abc"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn schema_mismatch_is_bad_request() {
        let err = ApiError::SchemaMismatch("unknown column".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
