use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;

use crate::{lifecycle::LifecycleError, utils::error_fmt_chain};

#[derive(Serialize)]
struct ErrorBody<'a>{
    error: &'a str
}

impl ResponseError for LifecycleError {
    fn status_code(&self) -> StatusCode {
        match self {
            LifecycleError::Validation(_) => StatusCode::BAD_REQUEST,
            LifecycleError::NotFound(..) => StatusCode::NOT_FOUND,
            LifecycleError::Conflict(_) => StatusCode::CONFLICT,
            LifecycleError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let LifecycleError::Internal(_) = self {
            tracing::error!(error = ?self, "Lifecycle operation failed");
        }

        HttpResponse::build(self.status_code())
            .json(ErrorBody{ error: &self.to_string() })
    }
}

/// Everything a handler can fail with before or after reaching the lifecycle.
#[derive(Error)]
pub enum ApiError{
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error("Failed due to internal error")]
    Threadpool(#[from] JoinError)
}

impl Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Lifecycle(e) => e.status_code(),
            ApiError::Threadpool(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Lifecycle(e) => e.error_response(),
            _ => {
                if let ApiError::Threadpool(_) = self {
                    tracing::error!(error = ?self, "Blocking task failed");
                }

                HttpResponse::build(self.status_code())
                    .json(ErrorBody{ error: &self.to_string() })
            }
        }
    }
}
