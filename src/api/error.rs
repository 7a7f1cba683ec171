use poem::error::ResponseError;
use poem::http::StatusCode;
use poem::Response;
use serde_json::json;

use crate::error::ServiceError;

impl ResponseError for ServiceError {
    fn status(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::DuplicateSlug(_) | ServiceError::AlreadySubscribed(_) => StatusCode::CONFLICT,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `{"error": <message>, "code": <code>}`. Store failures are logged and
    /// answered with a generic message.
    fn as_response(&self) -> Response {
        let message = match self {
            ServiceError::Store(err) => {
                tracing::error!("store failure: {err}");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = json!({ "error": message, "code": self.code() });
        Response::builder()
            .status(self.status())
            .content_type("application/json")
            .body(body.to_string())
    }
}
