use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorizeError {
    #[error("invalid image dimensions {width}x{height} with {len} bytes; need at least 3x3 RGBA8 pixels")]
    InvalidDimensions {
        width: usize,
        height: usize,
        len: usize,
    },
}
