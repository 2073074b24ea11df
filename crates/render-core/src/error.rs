use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },
    #[error("Document is not open; call open_document first")]
    DocumentNotOpen,
    #[error("Document was already built; open a new document before adding content")]
    DocumentClosed,
    #[error("Unsupported or corrupt image: {0}")]
    UnsupportedImage(String),
    #[error("Layout error: {0}")]
    Layout(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl RenderError {
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        RenderError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::UnsupportedImage(err.to_string())
    }
}

