pub mod chat;
pub mod data_sources;
pub mod debug;
pub mod demographics;
pub mod health;
pub mod source;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::model::chat::ErrorBody;
use thiserror::Error;

/// Failure of an API handler. Every variant is answered with an
/// [`ErrorBody`] so the frontend can echo the `error` field.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    /// Google or Anthropic answered with an error or could not be reached.
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Internal(String),
    #[error("데이터베이스 오류: {0}")]
    Database(#[from] rusqlite::Error),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Internal(_) | ServiceError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}
