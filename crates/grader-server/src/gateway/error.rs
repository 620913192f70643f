use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use grader::evaluator::EvaluatorError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("question not found: {id}")]
    QuestionNotFound { id: i64 },

    #[error("embedding model unavailable: {0}")]
    ModelUnavailable(String),
}

impl From<EvaluatorError> for GatewayError {
    fn from(err: EvaluatorError) -> Self {
        match err {
            EvaluatorError::QuestionNotFound { id } => GatewayError::QuestionNotFound { id },
            EvaluatorError::Embedding(e) => GatewayError::ModelUnavailable(e.to_string()),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::QuestionNotFound { .. } => StatusCode::NOT_FOUND,
            GatewayError::ModelUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
