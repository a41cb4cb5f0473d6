//! # Lenticular Core
//!
//! Shared types for the lenticular workspace: error definitions, colours used
//! for letterbox borders, vertical alignment of an image inside its padded
//! canvas, and a couple of angle helpers.

pub mod color;
pub mod error;
pub mod types;

pub use color::Color;
pub use error::{ConfigError, ConfigResult, Error, GeometryError, GeometryResult, Result};
pub use types::{degrees, radians, VerticalAlignment};
