//! Skeletal data model shared by the sensor collaborator and the pipeline.
//!
//! Raw joints are in sensor-native units (meters, sensor-centered). The
//! normalized hand types live here too so every stage speaks the same
//! vocabulary.

use crate::constants::NUM_BODY_JOINTS;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body side of a tracked hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// User's left hand
    Left,
    /// User's right hand
    Right,
}

impl Side {
    /// Both sides, in evaluation order
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    /// Index into per-side arrays
    pub const fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// Short tag used in logs ("l" / "r")
    pub const fn tag(self) -> &'static str {
        match self {
            Side::Left => "l",
            Side::Right => "r",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Joints the pipeline reads from a body frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointType {
    Neck,
    SpineBase,
    ShoulderLeft,
    ShoulderRight,
    ElbowLeft,
    ElbowRight,
    WristLeft,
    WristRight,
    HandLeft,
    HandRight,
}

impl JointType {
    /// Every joint a body frame carries
    pub const ALL: [JointType; NUM_BODY_JOINTS] = [
        JointType::Neck,
        JointType::SpineBase,
        JointType::ShoulderLeft,
        JointType::ShoulderRight,
        JointType::ElbowLeft,
        JointType::ElbowRight,
        JointType::WristLeft,
        JointType::WristRight,
        JointType::HandLeft,
        JointType::HandRight,
    ];

    /// Joints that must all be tracked to build the body-relative frame
    pub const REQUIRED: [JointType; 8] = [
        JointType::Neck,
        JointType::SpineBase,
        JointType::ShoulderLeft,
        JointType::ShoulderRight,
        JointType::ElbowLeft,
        JointType::ElbowRight,
        JointType::WristLeft,
        JointType::WristRight,
    ];

    /// Hand joint for a side
    pub const fn hand(side: Side) -> Self {
        match side {
            Side::Left => JointType::HandLeft,
            Side::Right => JointType::HandRight,
        }
    }

    /// Shoulder, elbow and wrist joints for a side
    pub const fn arm(side: Side) -> [Self; 3] {
        match side {
            Side::Left => [JointType::ShoulderLeft, JointType::ElbowLeft, JointType::WristLeft],
            Side::Right => [JointType::ShoulderRight, JointType::ElbowRight, JointType::WristRight],
        }
    }
}

/// One skeletal joint at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawJoint {
    /// Position in meters, sensor-centered; z grows away from the camera
    pub position: Vector3<f64>,
    /// Whether the sensor resolves this joint with sufficient confidence
    pub tracked: bool,
}

impl RawJoint {
    /// Create a tracked joint
    pub fn tracked(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            tracked: true,
        }
    }

    /// Create an untracked joint (position is whatever the sensor guessed)
    pub fn untracked(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            tracked: false,
        }
    }

    /// Euclidean distance to another joint
    pub fn distance(&self, other: &RawJoint) -> f64 {
        (self.position - other.position).norm()
    }
}

impl Default for RawJoint {
    fn default() -> Self {
        Self::untracked(0.0, 0.0, 0.0)
    }
}

/// The joint set of one body at one instant
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBodyFrame {
    /// Whether the sensor currently tracks this body at all
    pub tracked: bool,
    pub neck: RawJoint,
    pub spine_base: RawJoint,
    pub shoulder_left: RawJoint,
    pub shoulder_right: RawJoint,
    pub elbow_left: RawJoint,
    pub elbow_right: RawJoint,
    pub wrist_left: RawJoint,
    pub wrist_right: RawJoint,
    pub hand_left: RawJoint,
    pub hand_right: RawJoint,
}

impl RawBodyFrame {
    /// Look up a joint by type
    pub fn joint(&self, joint: JointType) -> &RawJoint {
        match joint {
            JointType::Neck => &self.neck,
            JointType::SpineBase => &self.spine_base,
            JointType::ShoulderLeft => &self.shoulder_left,
            JointType::ShoulderRight => &self.shoulder_right,
            JointType::ElbowLeft => &self.elbow_left,
            JointType::ElbowRight => &self.elbow_right,
            JointType::WristLeft => &self.wrist_left,
            JointType::WristRight => &self.wrist_right,
            JointType::HandLeft => &self.hand_left,
            JointType::HandRight => &self.hand_right,
        }
    }

    /// Mutable joint lookup, mostly for building synthetic frames
    pub fn joint_mut(&mut self, joint: JointType) -> &mut RawJoint {
        match joint {
            JointType::Neck => &mut self.neck,
            JointType::SpineBase => &mut self.spine_base,
            JointType::ShoulderLeft => &mut self.shoulder_left,
            JointType::ShoulderRight => &mut self.shoulder_right,
            JointType::ElbowLeft => &mut self.elbow_left,
            JointType::ElbowRight => &mut self.elbow_right,
            JointType::WristLeft => &mut self.wrist_left,
            JointType::WristRight => &mut self.wrist_right,
            JointType::HandLeft => &mut self.hand_left,
            JointType::HandRight => &mut self.hand_right,
        }
    }

    /// True when all eight body-frame joints are tracked
    pub fn has_required_joints(&self) -> bool {
        JointType::REQUIRED.iter().all(|&j| self.joint(j).tracked)
    }

    /// Number of tracked joints
    pub fn tracked_joint_count(&self) -> usize {
        JointType::ALL.iter().filter(|&&j| self.joint(j).tracked).count()
    }
}

/// Everything the sensor delivered for one tick: zero or more bodies
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorFrame {
    #[serde(default)]
    pub bodies: Vec<RawBodyFrame>,
}

impl SensorFrame {
    /// Frame with a single body
    pub fn single(body: RawBodyFrame) -> Self {
        Self { bodies: vec![body] }
    }

    /// Frame with no body in view
    pub fn empty() -> Self {
        Self::default()
    }

    /// First tracked body; others are ignored
    pub fn primary_body(&self) -> Option<&RawBodyFrame> {
        self.bodies.iter().find(|body| body.tracked)
    }
}

/// Body-relative, scale-normalized position of one hand
///
/// `x` is 0 on the neck-spine midline and ±1 at shoulder width, `y` is 0 at
/// the neck-spine midpoint and ±1 at the neck/spine-base distance, `z` is 0 on
/// the neck-spine plane and 1 at one calibrated arm length, signed according
/// to the configured [`DepthConvention`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedHand {
    pub position: Vector3<f64>,
}

impl NormalizedHand {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Vector3::new(x, y, z),
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }
}

/// Normalizer output for one tick; `None` marks an invalid side
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandPair {
    pub left: Option<NormalizedHand>,
    pub right: Option<NormalizedHand>,
}

impl HandPair {
    /// Both sides invalid
    pub const fn invalid() -> Self {
        Self { left: None, right: None }
    }

    pub fn get(&self, side: Side) -> Option<&NormalizedHand> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    pub fn set(&mut self, side: Side, hand: Option<NormalizedHand>) {
        match side {
            Side::Left => self.left = hand,
            Side::Right => self.right = hand,
        }
    }

    /// Whether a side carries a valid normalized position
    pub fn is_valid(&self, side: Side) -> bool {
        self.get(side).is_some()
    }
}

/// Sign convention of normalized depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthConvention {
    /// z grows as the hand approaches the camera
    #[default]
    TowardCameraPositive,
    /// z shrinks as the hand approaches the camera (raw sensor orientation)
    TowardCameraNegative,
}

impl DepthConvention {
    /// Convert a sensor-space depth offset (positive = away from camera)
    /// into normalized depth under this convention
    pub fn from_sensor_offset(self, offset: f64) -> f64 {
        match self {
            DepthConvention::TowardCameraPositive => -offset,
            DepthConvention::TowardCameraNegative => offset,
        }
    }

    /// Closeness to camera for a normalized depth or depth delta
    pub fn closeness(self, z: f64) -> f64 {
        match self {
            DepthConvention::TowardCameraPositive => z,
            DepthConvention::TowardCameraNegative => -z,
        }
    }
}
