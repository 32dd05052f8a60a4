//! Stipple Paint types
//!
//! The value types shared between the software rasterizer and its hosts.
//!
//! # Features
//!
//! - 8-bit RGB colors with hex parsing
//! - Integer rectangles with clipping helpers
//! - Per-call render styles (fill mode, stroke, shadow, bevel, clip)
//! - Two-color vertical gradients

pub mod color;
pub mod gradient;
pub mod primitives;
pub mod style;

pub use color::Color;
pub use gradient::Gradient;
pub use primitives::{Padding, Point, Rect};
pub use style::*;
