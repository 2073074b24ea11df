use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Everything that can stop the service from answering with a PDF.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Generation(#[from] folio::Error),

    #[error("Render task failed: {0}")]
    TaskFailed(String),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Page rendering failed: {0}")]
    Page(#[from] handlebars::RenderError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        tracing::error!("Internal error: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal error occurred",
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
