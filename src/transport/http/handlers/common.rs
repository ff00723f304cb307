use crate::app::ServiceError;
use crate::transport::http::types::ErrorBody;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error};

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::Validation(_)
            | ServiceError::Conflict
            | ServiceError::InvalidCredentials
            | ServiceError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Forbidden => StatusCode::FORBIDDEN,
            ServiceError::Storage(_)
            | ServiceError::Token(_)
            | ServiceError::PasswordHash(_)
            | ServiceError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if self.is_internal() {
            error!(error = %self, "request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.code().to_string(),
            }),
        )
            .into_response()
    }
}

/// Unwraps a JSON body. A request without a JSON body reads as an empty one, so required-field
/// checks downstream report it as `missing`. A body that is present but does not parse into `T`
/// is rejected whole; no field of it is used.
pub fn parse_body<T: Default>(request: Result<Json<T>, JsonRejection>) -> Result<T, ServiceError> {
    match request {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(e)) => {
            debug!(error = %e, "no JSON body, treating as empty");
            Ok(T::default())
        }
        Err(e) => {
            debug!(error = %e, "rejecting malformed JSON body");
            Err(ServiceError::MalformedBody(e.body_text()))
        }
    }
}
