//! Rasterizer error types

use thiserror::Error;

use crate::format::PixelFormat;

/// Configuration errors raised while creating renderers and surfaces
///
/// Drawing itself never fails: degenerate geometry is skipped and
/// off-surface writes are clipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// Only 16-bit and 32-bit pixel storage is supported
    #[error("Unsupported pixel depth: {0} bytes per pixel (expected 2 or 4)")]
    UnsupportedDepth(u8),

    /// A surface was bound to a renderer built for another layout
    #[error("Surface format {found:?} does not match renderer format {expected:?}")]
    FormatMismatch {
        expected: PixelFormat,
        found: PixelFormat,
    },

    /// Backing storage shorter than `pitch * (height - 1) + width`
    #[error("Pixel buffer holds {actual} pixels, {required} required")]
    BufferTooSmall { required: usize, actual: usize },

    /// Width, height or pitch out of range
    #[error("Invalid surface geometry: {0}")]
    InvalidGeometry(String),

    /// Unknown pixel format name
    #[error("Unknown pixel format: {0}")]
    UnknownFormat(String),
}

/// Result type for rasterizer configuration
pub type Result<T> = std::result::Result<T, RasterError>;
