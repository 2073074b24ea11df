use folio_render_core::RenderError;
use thiserror::Error;

/// Errors raised while turning an article request into PDF bytes.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Invalid article content: {0}")]
    Content(String),
}

impl Error {
    pub fn content(message: impl Into<String>) -> Self {
        Error::Content(message.into())
    }
}
