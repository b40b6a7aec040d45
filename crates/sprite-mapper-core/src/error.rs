use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpriteMapperError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid sheet dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    /// A sprite did not fit anywhere in the tree. `tree` holds a JSON dump of
    /// the partition at the moment of failure.
    #[error(
        "Not enough space for sprite '{name}' ({width}x{height}); placed {placed} of {total}"
    )]
    InsufficientSpace {
        name: String,
        width: u32,
        height: u32,
        placed: usize,
        total: usize,
        tree: String,
    },
}

pub type Result<T> = std::result::Result<T, SpriteMapperError>;
