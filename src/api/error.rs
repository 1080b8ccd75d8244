//! Terminal request errors as HTTP responses.

use crate::graph::GraphError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// `{code, message, status}` body of a terminal error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub status: u16,
}

#[derive(Debug)]
pub struct ApiError(pub GraphError);

impl From<GraphError> for ApiError {
    fn from(e: GraphError) -> Self {
        ApiError(e)
    }
}

impl ApiError {
    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            code: self.0.code(),
            message: self.0.to_string(),
            status: self.0.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope = self.envelope();
        let status = StatusCode::from_u16(envelope.status).unwrap_or(StatusCode::NOT_FOUND);
        tracing::warn!(code = %envelope.code, status = envelope.status, "Request rejected");
        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ResourceKind;

    #[test]
    fn envelope_for_missing_ids() {
        let envelope = ApiError(GraphError::NoIdsSpecified(ResourceKind::Post)).envelope();
        assert_eq!(
            envelope,
            ErrorEnvelope {
                code: "graphql_no_post_ids".to_string(),
                message: "No valid post ids specified".to_string(),
                status: 404,
            }
        );
    }

    #[test]
    fn terminal_errors_are_not_found() {
        let response = ApiError(GraphError::NoFields).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
