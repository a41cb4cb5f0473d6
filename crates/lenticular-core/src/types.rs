//! Small value types shared by the slicer, settings and panel crates.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Convert degrees to radians
pub fn radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Convert radians to degrees
pub fn degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Where an image sits vertically inside its padded canvas
///
/// `0.0` pins the image to the top, `0.5` centres it and `1.0` pins it to the
/// bottom. Any value in between distributes the padding proportionally.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct VerticalAlignment(f64);

impl VerticalAlignment {
    pub const TOP: VerticalAlignment = VerticalAlignment(0.0);
    pub const MIDDLE: VerticalAlignment = VerticalAlignment(0.5);
    pub const BOTTOM: VerticalAlignment = VerticalAlignment(1.0);

    /// Validated constructor
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::AlignmentOutOfRange(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for VerticalAlignment {
    fn default() -> Self {
        Self::MIDDLE
    }
}

impl TryFrom<f64> for VerticalAlignment {
    type Error = ConfigError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VerticalAlignment> for f64 {
    fn from(alignment: VerticalAlignment) -> Self {
        alignment.0
    }
}
