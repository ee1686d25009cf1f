//! Punch detection with a shared cooldown gate.
//!
//! A side fires when the hand is fully extended toward the camera, the depth
//! velocity over the filter window exceeds the threshold, and the cooldown
//! gate allows it. Both sides share one gate, so at most one punch is
//! accepted per cooldown interval.

use crate::{
    assets::CrackDecal,
    clock::Clock,
    config::DetectionConfig,
    cooldown::{CooldownGate, GateState},
    screen::{AlphaMapping, ScreenPoint},
    skeleton::{DepthConvention, NormalizedHand, Side},
    Result,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An accepted punch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PunchEvent {
    pub side: Side,
    /// Smoothed screen-space anchor of the punching hand
    pub anchor: ScreenPoint,
    pub alpha: u8,
    /// Depth velocity toward the camera that qualified the punch
    pub velocity: f64,
    /// Crack decal chosen for this punch, filled in by the pipeline
    pub decal: Option<CrackDecal>,
}

/// Stateful detector; owns the cooldown gate
pub struct PunchDetector {
    alpha_mapping: AlphaMapping,
    extension_alpha: u8,
    velocity_threshold: f64,
    depth_convention: DepthConvention,
    gate: CooldownGate,
    clock: Arc<dyn Clock>,
}

impl PunchDetector {
    /// Create a detector
    ///
    /// # Errors
    ///
    /// Returns an error if the detection parameters are invalid
    pub fn new(config: &DetectionConfig, depth_convention: DepthConvention, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            alpha_mapping: config.alpha_mapping,
            extension_alpha: config.extension_alpha,
            velocity_threshold: config.velocity_threshold,
            depth_convention,
            gate: CooldownGate::from_secs_f64(config.cooldown_seconds)?,
            clock,
        })
    }

    /// Closeness score of a hand in [0, 255]
    pub fn alpha(&self, hand: &NormalizedHand) -> u8 {
        self.alpha_mapping.alpha_for(hand, self.depth_convention)
    }

    /// Whether an alpha counts as a fully extended arm
    pub fn is_extended(&self, alpha: u8) -> bool {
        alpha >= self.extension_alpha
    }

    /// Evaluate one side for this tick
    ///
    /// `velocity` is the windowed depth difference from the filter; `anchor`
    /// is the smoothed screen position. Missing data yields no event.
    pub fn detect(
        &mut self,
        side: Side,
        hand: Option<&NormalizedHand>,
        anchor: Option<ScreenPoint>,
        velocity: Option<f64>,
    ) -> Option<PunchEvent> {
        let hand = hand?;
        let alpha = self.alpha(hand);
        if !self.is_extended(alpha) {
            return None;
        }

        let approach = self.depth_convention.closeness(velocity?);
        if approach <= self.velocity_threshold {
            return None;
        }
        let anchor = anchor?;

        let now = self.clock.now();
        if !self.gate.try_trigger(now) {
            debug!("Punch on side {side} suppressed by cooldown (velocity {approach:.3})");
            return None;
        }

        debug!(
            "Punch on side {side} at ({}, {}), velocity {approach:.3}",
            anchor.x, anchor.y
        );
        Some(PunchEvent {
            side,
            anchor,
            alpha,
            velocity: approach,
            decal: None,
        })
    }

    /// Current gate state
    pub fn gate_state(&self) -> GateState {
        self.gate.state(self.clock.now())
    }

    pub fn velocity_threshold(&self) -> f64 {
        self.velocity_threshold
    }

    /// Re-open the gate immediately
    pub fn reset(&mut self) {
        self.gate.reset();
    }
}

impl std::fmt::Debug for PunchDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PunchDetector")
            .field("alpha_mapping", &self.alpha_mapping)
            .field("extension_alpha", &self.extension_alpha)
            .field("velocity_threshold", &self.velocity_threshold)
            .field("depth_convention", &self.depth_convention)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::time::Duration;

    fn detector(clock: &ManualClock) -> PunchDetector {
        let config = DetectionConfig {
            alpha_mapping: AlphaMapping::Linear { scale: 1.0, offset: 0.0 },
            extension_alpha: 255,
            velocity_threshold: 0.05,
            cooldown_seconds: 0.5,
        };
        PunchDetector::new(&config, DepthConvention::TowardCameraPositive, Arc::new(clock.clone())).unwrap()
    }

    fn extended() -> NormalizedHand {
        NormalizedHand::new(0.1, 0.1, 1.0)
    }

    const ANCHOR: Option<ScreenPoint> = Some(ScreenPoint::new(10, 20));

    #[test]
    fn test_fires_when_all_conditions_hold() {
        let clock = ManualClock::new();
        let mut detector = detector(&clock);
        let event = detector.detect(Side::Right, Some(&extended()), ANCHOR, Some(0.1)).unwrap();
        assert_eq!(event.side, Side::Right);
        assert_eq!(event.alpha, 255);
        assert_eq!(event.anchor, ScreenPoint::new(10, 20));
        assert_eq!(detector.gate_state(), GateState::Disabled);
    }

    #[test]
    fn test_requires_extension() {
        let clock = ManualClock::new();
        let mut detector = detector(&clock);
        let half = NormalizedHand::new(0.0, 0.0, 0.5);
        assert!(detector.detect(Side::Left, Some(&half), ANCHOR, Some(1.0)).is_none());
        assert_eq!(detector.gate_state(), GateState::Allowed);
    }

    #[test]
    fn test_requires_velocity() {
        let clock = ManualClock::new();
        let mut detector = detector(&clock);
        assert!(detector.detect(Side::Left, Some(&extended()), ANCHOR, None).is_none());
        // Threshold is strict
        assert!(detector.detect(Side::Left, Some(&extended()), ANCHOR, Some(0.05)).is_none());
        // Pulling back does not count
        assert!(detector.detect(Side::Left, Some(&extended()), ANCHOR, Some(-0.5)).is_none());
        assert!(detector.detect(Side::Left, None, ANCHOR, Some(0.5)).is_none());
    }

    #[test]
    fn test_cooldown_suppresses_then_releases() {
        let clock = ManualClock::new();
        let mut detector = detector(&clock);
        assert!(detector.detect(Side::Left, Some(&extended()), ANCHOR, Some(0.2)).is_some());

        clock.advance(Duration::from_millis(499));
        assert!(detector.detect(Side::Right, Some(&extended()), ANCHOR, Some(0.2)).is_none());

        clock.advance(Duration::from_millis(1));
        assert_eq!(detector.gate_state(), GateState::Allowed);
        assert!(detector.detect(Side::Right, Some(&extended()), ANCHOR, Some(0.2)).is_some());
    }

    #[test]
    fn test_negative_convention_velocity() {
        let clock = ManualClock::new();
        let config = DetectionConfig {
            alpha_mapping: AlphaMapping::Linear { scale: 1.0, offset: 0.0 },
            extension_alpha: 255,
            velocity_threshold: 0.05,
            cooldown_seconds: 0.5,
        };
        let mut detector =
            PunchDetector::new(&config, DepthConvention::TowardCameraNegative, Arc::new(clock)).unwrap();
        let hand = NormalizedHand::new(0.0, 0.0, -1.0);
        let event = detector.detect(Side::Left, Some(&hand), ANCHOR, Some(-0.1)).unwrap();
        assert!((event.velocity - 0.1).abs() < 1e-12);
    }
}
