use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Field(#[from] qfield_core::Error),

    #[error("invalid render settings: {0}")]
    InvalidSettings(String),

    #[error("drawing failed: {0}")]
    Drawing(String),

    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Io(err.to_string())
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::Encode(err.to_string())
    }
}
