//! Panel configuration structures
//!
//! A scene holds one or more panels. Each panel names its physical width,
//! the interlace angle between its two facet families, its aspect ratio (or
//! `"auto"` to fit it to the loaded images) and one [`FaceConfig`] per image
//! slot.

use crate::error::{Result, SettingsError};
use lenticular_core::{Color, ConfigError, ConfigResult, VerticalAlignment};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::path::PathBuf;

/// Number of faces a lenticular panel carries
pub const FACE_COUNT: usize = 2;

/// Pixel dimensions of the two images the stock panel was designed around
const REFERENCE_FACE_PIXELS: [(f64, f64); FACE_COUNT] = [(1186.0, 640.0), (770.0, 442.0)];

/// Panel aspect ratio
///
/// Serialised as a plain number or the keyword `"auto"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AspectRatioRepr", into = "AspectRatioRepr")]
pub enum AspectRatio {
    /// Width over height, fixed by configuration
    Fixed(f64),
    /// Fitted to the natural aspect ratios of the loaded images
    Auto,
}

impl AspectRatio {
    pub fn is_auto(&self) -> bool {
        matches!(self, AspectRatio::Auto)
    }

    pub fn fixed(&self) -> Option<f64> {
        match self {
            AspectRatio::Fixed(value) => Some(*value),
            AspectRatio::Auto => None,
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectRatio::Fixed(value) => write!(f, "{}", value),
            AspectRatio::Auto => write!(f, "auto"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AspectRatioRepr {
    Number(f64),
    Keyword(String),
}

impl TryFrom<AspectRatioRepr> for AspectRatio {
    type Error = String;

    fn try_from(repr: AspectRatioRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            AspectRatioRepr::Number(value) => Ok(AspectRatio::Fixed(value)),
            AspectRatioRepr::Keyword(word) if word.eq_ignore_ascii_case("auto") => {
                Ok(AspectRatio::Auto)
            }
            AspectRatioRepr::Keyword(word) => Err(format!(
                "aspect ratio must be a number or \"auto\", got \"{}\"",
                word
            )),
        }
    }
}

impl From<AspectRatio> for AspectRatioRepr {
    fn from(ratio: AspectRatio) -> Self {
        match ratio {
            AspectRatio::Fixed(value) => AspectRatioRepr::Number(value),
            AspectRatio::Auto => AspectRatioRepr::Keyword("auto".to_string()),
        }
    }
}

/// One image slot of a panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceConfig {
    /// Padding colour used when the image does not fill the face
    pub border_color: Color,
    pub vertical_alignment: VerticalAlignment,
    /// Relative length of this face's facets
    pub side_length: f64,
    /// Image to load into the face
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            border_color: Color::BLUE,
            vertical_alignment: VerticalAlignment::MIDDLE,
            side_length: 1.0,
            image: None,
        }
    }
}

impl FaceConfig {
    pub fn with_side_length(side_length: f64) -> Self {
        Self {
            side_length,
            ..Self::default()
        }
    }
}

/// Configuration of one lenticular panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Physical width in scene units
    pub width: f64,
    /// Angle between the two facet families at each ridge, in radians
    pub interlace_angle: f64,
    pub aspect_ratio: AspectRatio,
    /// Number of facet pairs
    pub slice_count: usize,
    pub faces: Vec<FaceConfig>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        let [(w0, h0), (w1, h1)] = REFERENCE_FACE_PIXELS;
        let first_side = (w0 / h0) / (w1 / h1);
        Self {
            width: 9.0,
            interlace_angle: PI / 2.0,
            aspect_ratio: AspectRatio::Fixed(first_side.hypot(1.0) * w1 / h1),
            slice_count: 9,
            faces: vec![
                FaceConfig::with_side_length(first_side),
                FaceConfig::with_side_length(1.0),
            ],
        }
    }
}

impl PanelConfig {
    /// Check every field; values are never clamped
    pub fn validate(&self) -> ConfigResult<()> {
        if self.slice_count == 0 {
            return Err(ConfigError::InvalidSliceCount(self.slice_count));
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ConfigError::NonPositiveWidth(self.width));
        }
        if !(self.interlace_angle > 0.0 && self.interlace_angle < PI) {
            return Err(ConfigError::InterlaceAngleOutOfRange(self.interlace_angle));
        }
        if let AspectRatio::Fixed(value) = self.aspect_ratio {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveAspectRatio(value));
            }
        }
        if self.faces.len() != FACE_COUNT {
            return Err(ConfigError::FaceCount {
                expected: FACE_COUNT,
                actual: self.faces.len(),
            });
        }
        for (face, config) in self.faces.iter().enumerate() {
            let value = config.side_length;
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveSideLength { face, value });
            }
        }
        Ok(())
    }

    /// Side length of every face, in face order
    pub fn side_lengths(&self) -> Vec<f64> {
        self.faces.iter().map(|f| f.side_length).collect()
    }
}

/// All panels of a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub panels: Vec<PanelConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            panels: vec![PanelConfig::default()],
        }
    }
}

impl SceneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every panel, reporting the first failure with its index
    pub fn validate(&self) -> Result<()> {
        for (index, panel) in self.panels.iter().enumerate() {
            panel
                .validate()
                .map_err(|source| SettingsError::InvalidPanel { index, source })?;
        }
        Ok(())
    }
}
