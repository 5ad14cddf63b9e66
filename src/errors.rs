use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::db::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("url must start with http:// or https://")]
    InvalidUrl,
    #[error("short url not found")]
    NotFound,
    #[error("could not find a free short id after {0} attempts")]
    ShortIdExhausted(usize),
    #[error("database error: {0}")]
    Store(#[from] StoreError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // there's no real consensus on the status code for a rejected url
            AppError::InvalidUrl => StatusCode::CONFLICT,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::ShortIdExhausted(_) | AppError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Store(e) = self {
            log::error!("{}", e);
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}
