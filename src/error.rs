use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

/// Central handler error. User-input problems are handled inline by the
/// form handlers (they re-render the form); this type covers everything
/// that maps straight to a status code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("report not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Report not found").into_response(),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Database(e) => {
                // Detail stays server-side; the user sees a generic message.
                error!("database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
            }
            AppError::Template(e) => {
                error!("template render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Render error").into_response()
            }
        }
    }
}
