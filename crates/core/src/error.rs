//! Configuration errors raised while wiring a picture to a display surface.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FieldError>;

/// Fatal setup errors. None of these are recoverable: they are reported once at
/// initialization and the viewer does not start.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("{array} array needs {needed} bytes at offset {offset}, region holds {available}")]
    RegionTooSmall {
        array: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("a {width}x{height} grid does not fit in addressable memory")]
    GridTooLarge { width: u32, height: u32 },

    #[error("cell size must be at least one pixel")]
    ZeroCellSize,

    #[error("surface of {width}x{height} pixels exceeds the addressable size")]
    SurfaceTooLarge { width: u64, height: u64 },

    #[error("render mode {0} needs a counter array, but the picture exposes none")]
    MissingCounter(&'static str),
}
