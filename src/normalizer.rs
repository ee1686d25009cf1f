//! Body-relative hand normalization.
//!
//! Converts raw, device-specific joint positions into coordinates centered on
//! the neck-spine midpoint and scaled by the user's own body: shoulder width
//! for x, neck-spine length for y and calibrated arm length for z.

use crate::{
    calibration::ArmLengthEstimate,
    config::NormalizationConfig,
    constants::{EPSILON, NUM_BODY_JOINTS},
    skeleton::{DepthConvention, HandPair, JointType, NormalizedHand, RawBodyFrame, Side},
    Result,
};
use log::{trace, warn};

/// Stateful normalizer; owns the per-side arm-length calibration
#[derive(Debug, Clone)]
pub struct BodyNormalizer {
    shoulder_width_scale: f64,
    neck_spine_scale: f64,
    depth_convention: DepthConvention,
    arm_lengths: [ArmLengthEstimate; 2],
}

impl BodyNormalizer {
    /// Create a normalizer from its configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if a scale is not positive or the calibration window is 0
    pub fn new(config: &NormalizationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            shoulder_width_scale: config.shoulder_width_scale,
            neck_spine_scale: config.neck_spine_scale,
            depth_convention: config.depth_convention,
            arm_lengths: [
                ArmLengthEstimate::new(config.arm_length_window)?,
                ArmLengthEstimate::new(config.arm_length_window)?,
            ],
        })
    }

    /// Normalize both hands of a body frame
    ///
    /// A missing body, or any untracked body-frame joint, invalidates both
    /// sides. Calibration is updated whenever the body-frame joints are
    /// tracked, regardless of whether the hands themselves are.
    pub fn normalize(&mut self, body: Option<&RawBodyFrame>) -> HandPair {
        let Some(body) = body else {
            return HandPair::invalid();
        };
        if !body.has_required_joints() {
            trace!(
                "Body frame joints incomplete ({} of {NUM_BODY_JOINTS} tracked), skipping normalization",
                body.tracked_joint_count()
            );
            return HandPair::invalid();
        }

        let neck = body.joint(JointType::Neck);
        let spine = body.joint(JointType::SpineBase);
        let midpoint = (neck.position + spine.position) * 0.5;

        let shoulder_width = (body.joint(JointType::ShoulderRight).distance(neck)
            + body.joint(JointType::ShoulderLeft).distance(neck))
            * self.shoulder_width_scale;
        let neck_spine_length = neck.distance(spine) * self.neck_spine_scale;

        for side in Side::ALL {
            let [shoulder, elbow, wrist] = JointType::arm(side);
            let arm_length = body.joint(shoulder).distance(body.joint(elbow))
                + body.joint(elbow).distance(body.joint(wrist));
            self.arm_lengths[side.index()].push(arm_length);
        }

        if shoulder_width <= EPSILON || neck_spine_length <= EPSILON {
            warn!(
                "Degenerate body geometry (shoulder width {shoulder_width:.4}, neck-spine {neck_spine_length:.4})"
            );
            return HandPair::invalid();
        }

        let mut hands = HandPair::invalid();
        for side in Side::ALL {
            let hand = body.joint(JointType::hand(side));
            if !hand.tracked {
                continue;
            }
            let Some(arm_length) = self.arm_lengths[side.index()].mean() else {
                warn!("No usable arm length calibration for side {side}");
                continue;
            };

            let offset = hand.position - midpoint;
            hands.set(
                side,
                Some(NormalizedHand::new(
                    offset.x / shoulder_width,
                    offset.y / neck_spine_length,
                    self.depth_convention.from_sensor_offset(offset.z) / arm_length,
                )),
            );
        }
        hands
    }

    /// Calibration state for one side
    pub fn calibration(&self, side: Side) -> &ArmLengthEstimate {
        &self.arm_lengths[side.index()]
    }

    /// Depth sign convention applied to z
    pub fn depth_convention(&self) -> DepthConvention {
        self.depth_convention
    }

    /// Forget all calibration samples
    pub fn reset(&mut self) {
        for estimate in &mut self.arm_lengths {
            estimate.reset();
        }
    }
}
