// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::errors::PipelineError;
use crate::domain::repositories::RepositoryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，按错误类型映射 HTTP 状态码
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    pub fn status(&self) -> StatusCode {
        if let Some(err) = self.0.downcast_ref::<PipelineError>() {
            return match err {
                PipelineError::ValidationError(_) => StatusCode::BAD_REQUEST,
                PipelineError::NotFound(_) | PipelineError::NotReady(_) => StatusCode::NOT_FOUND,
                PipelineError::AlreadyLiked | PipelineError::NotLiked => StatusCode::CONFLICT,
                PipelineError::GenerationFailed(_) => StatusCode::GONE,
                PipelineError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
                PipelineError::GenerationRequestFailed(_)
                | PipelineError::MissingDependency(_)
                | PipelineError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
        }

        match self.0.downcast_ref::<RepositoryError>() {
            Some(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = self.0.to_string();

        if status.is_server_error() {
            error!("Request failed: {}", error_message);
        }

        let body = Json(json!({ "success": false, "error": error_message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
