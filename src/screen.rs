//! Mapping from body-relative hand coordinates to screen space.
//!
//! Normalized x/y become pixel anchors centered on the screen, and normalized
//! depth becomes an alpha ("closeness to camera") score in [0, 255].

use crate::{
    constants::ALPHA_MAX,
    skeleton::{DepthConvention, NormalizedHand},
    utils::safe_cast::{f64_to_alpha, f64_to_i32_clamp},
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// A point in screen pixels; may lie outside the visible area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Maps normalized hand coordinates onto a screen of fixed size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMapper {
    width: u32,
    height: u32,
}

impl ScreenMapper {
    /// Create a mapper for a `width` x `height` screen
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is 0
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidInput(format!(
                "Screen dimensions must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Pixel anchor for a normalized position
    ///
    /// x = 0 maps to the horizontal center and ±1 moves one screen width;
    /// y is flipped since body space points up and screen space points down.
    pub fn anchor(&self, hand: &NormalizedHand) -> ScreenPoint {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let px = hand.x() * w + w / 2.0;
        let py = -hand.y() * h + h / 2.0;
        ScreenPoint::new(
            f64_to_i32_clamp(px, i32::MIN, i32::MAX),
            f64_to_i32_clamp(py, i32::MIN, i32::MAX),
        )
    }

    /// Whether a point lies on the visible screen
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= 0
            && point.y >= 0
            && i64::from(point.x) < i64::from(self.width)
            && i64::from(point.y) < i64::from(self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Mapping from closeness to camera onto alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlphaMapping {
    /// `255 * scale * (closeness - offset)`
    Linear { scale: f64, offset: f64 },
    /// `255 * scale * max(closeness, 0) ^ exponent`
    Power { scale: f64, exponent: f64 },
}

impl Default for AlphaMapping {
    fn default() -> Self {
        AlphaMapping::Linear {
            scale: crate::constants::DEFAULT_ALPHA_SCALE,
            offset: 0.0,
        }
    }
}

impl AlphaMapping {
    /// Alpha for a closeness value (normalized depth toward the camera)
    pub fn alpha(&self, closeness: f64) -> u8 {
        let max = f64::from(ALPHA_MAX);
        let raw = match *self {
            AlphaMapping::Linear { scale, offset } => max * scale * (closeness - offset),
            AlphaMapping::Power { scale, exponent } => max * scale * closeness.max(0.0).powf(exponent),
        };
        f64_to_alpha(raw)
    }

    /// Alpha for a normalized hand under a depth convention
    pub fn alpha_for(&self, hand: &NormalizedHand, convention: DepthConvention) -> u8 {
        self.alpha(convention.closeness(hand.z()))
    }

    /// Check parameters are usable
    ///
    /// # Errors
    ///
    /// Returns an error if the scale or exponent is not positive, or the offset is not finite
    pub fn validate(&self) -> Result<()> {
        match *self {
            AlphaMapping::Linear { scale, offset } => {
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(Error::ConfigError("Alpha scale must be positive".to_string()));
                }
                if !offset.is_finite() {
                    return Err(Error::ConfigError("Alpha offset must be finite".to_string()));
                }
            }
            AlphaMapping::Power { scale, exponent } => {
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(Error::ConfigError("Alpha scale must be positive".to_string()));
                }
                if !(exponent.is_finite() && exponent > 0.0) {
                    return Err(Error::ConfigError("Alpha exponent must be positive".to_string()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_center_and_edges() {
        let mapper = ScreenMapper::new(1000, 800).unwrap();
        assert_eq!(mapper.anchor(&NormalizedHand::new(0.0, 0.0, 0.0)), ScreenPoint::new(500, 400));
        assert_eq!(mapper.anchor(&NormalizedHand::new(0.25, 0.25, 0.0)), ScreenPoint::new(750, 200));
        assert_eq!(mapper.anchor(&NormalizedHand::new(-0.5, -0.5, 0.0)), ScreenPoint::new(0, 800));
    }

    #[test]
    fn test_contains() {
        let mapper = ScreenMapper::new(100, 50).unwrap();
        assert!(mapper.contains(ScreenPoint::new(0, 0)));
        assert!(mapper.contains(ScreenPoint::new(99, 49)));
        assert!(!mapper.contains(ScreenPoint::new(100, 10)));
        assert!(!mapper.contains(ScreenPoint::new(-1, 10)));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(ScreenMapper::new(0, 10).is_err());
        assert!(ScreenMapper::new(10, 0).is_err());
    }

    #[test]
    fn test_linear_alpha() {
        let mapping = AlphaMapping::Linear { scale: 1.0, offset: 0.0 };
        assert_eq!(mapping.alpha(-0.5), 0);
        assert_eq!(mapping.alpha(0.5), 127);
        assert_eq!(mapping.alpha(1.0), 255);
        assert_eq!(mapping.alpha(3.0), 255);

        // Default scale reaches full alpha at two thirds of an arm length
        assert_eq!(AlphaMapping::default().alpha(0.67), 255);
        assert!(AlphaMapping::default().alpha(0.6) < 255);
    }

    #[test]
    fn test_offset_alpha() {
        let mapping = AlphaMapping::Linear { scale: 1.25, offset: 0.2 };
        assert_eq!(mapping.alpha(0.2), 0);
        assert_eq!(mapping.alpha(0.6), 127);
        assert_eq!(mapping.alpha(1.1), 255);
    }

    #[test]
    fn test_power_alpha() {
        let mapping = AlphaMapping::Power { scale: 1.0, exponent: 2.0 };
        assert_eq!(mapping.alpha(-1.0), 0);
        assert_eq!(mapping.alpha(0.5), 63);
        assert_eq!(mapping.alpha(1.0), 255);
    }

    #[test]
    fn test_alpha_follows_depth_convention() {
        let mapping = AlphaMapping::Linear { scale: 1.0, offset: 0.0 };
        let hand = NormalizedHand::new(0.0, 0.0, -1.0);
        assert_eq!(mapping.alpha_for(&hand, DepthConvention::TowardCameraNegative), 255);
        assert_eq!(mapping.alpha_for(&hand, DepthConvention::TowardCameraPositive), 0);
    }

    #[test]
    fn test_validate() {
        assert!(AlphaMapping::default().validate().is_ok());
        assert!(AlphaMapping::Linear { scale: 0.0, offset: 0.0 }.validate().is_err());
        assert!(AlphaMapping::Power { scale: 1.0, exponent: -1.0 }.validate().is_err());
    }
}
