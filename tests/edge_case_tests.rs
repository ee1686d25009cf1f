//! Edge case tests for normalization, mapping and detection


use screen_punch::{
    config::{Config, NormalizationConfig},
    normalizer::BodyNormalizer,
    screen::{AlphaMapping, ScreenMapper, ScreenPoint},
    skeleton::{DepthConvention, HandPair, JointType, NormalizedHand, RawJoint, SensorFrame, Side},
};
use test_helpers::{frame_with_hands, hand_at, init_logging, manual_pipeline, upright_body, ARM_LENGTH};

fn normalizer() -> BodyNormalizer {
    BodyNormalizer::new(&NormalizationConfig::default()).unwrap()
}

#[test]
fn test_each_missing_body_joint_invalidates_both_hands() {
    init_logging();
    for joint in JointType::REQUIRED {
        let mut body = upright_body();
        body.joint_mut(joint).tracked = false;

        let mut normalizer = normalizer();
        assert_eq!(normalizer.normalize(Some(&body)), HandPair::invalid(), "{joint:?}");
    }
}

#[test]
fn test_untracked_hand_only_invalidates_its_side() {
    let mut body = upright_body();
    body.hand_right.tracked = false;

    let hands = normalizer().normalize(Some(&body));
    assert!(hands.is_valid(Side::Left));
    assert!(!hands.is_valid(Side::Right));
}

#[test]
fn test_untracked_hand_still_calibrates() {
    let mut body = upright_body();
    body.hand_left.tracked = false;
    body.hand_right.tracked = false;

    let mut normalizer = normalizer();
    for _ in 0..3 {
        assert_eq!(normalizer.normalize(Some(&body)), HandPair::invalid());
    }
    assert_eq!(normalizer.calibration(Side::Left).len(), 3);
    let mean = normalizer.calibration(Side::Right).mean().unwrap();
    assert!((mean - ARM_LENGTH).abs() < 1e-9);
}

#[test]
fn test_degenerate_shoulders() {
    init_logging();
    let mut body = upright_body();
    let neck = body.neck;
    body.shoulder_left = neck;
    body.shoulder_right = neck;

    assert_eq!(normalizer().normalize(Some(&body)), HandPair::invalid());
}

#[test]
fn test_degenerate_torso() {
    let mut body = upright_body();
    body.spine_base = body.neck;

    assert_eq!(normalizer().normalize(Some(&body)), HandPair::invalid());
}

#[test]
fn test_collapsed_arms_give_no_depth() {
    let mut body = upright_body();
    for side in Side::ALL {
        let [shoulder, elbow, wrist] = JointType::arm(side);
        let at = *body.joint(shoulder);
        *body.joint_mut(elbow) = at;
        *body.joint_mut(wrist) = at;
    }

    let hands = normalizer().normalize(Some(&body));
    assert_eq!(hands, HandPair::invalid());
}

#[test]
fn test_normalized_coordinates() {
    let mut body = upright_body();
    body.hand_right = hand_at(0.75, -0.5, 1.0);

    let hands = normalizer().normalize(Some(&body));
    let right = hands.get(Side::Right).unwrap();
    assert!((right.x() - 0.75).abs() < 1e-9);
    assert!((right.y() + 0.5).abs() < 1e-9);
    assert!((right.z() - 1.0).abs() < 1e-9);
}

#[test]
fn test_negative_depth_convention() {
    let config = NormalizationConfig {
        depth_convention: DepthConvention::TowardCameraNegative,
        ..NormalizationConfig::default()
    };
    let mut body = upright_body();
    body.hand_left = hand_at(0.0, 0.0, 0.8);

    let hands = BodyNormalizer::new(&config).unwrap().normalize(Some(&body));
    assert!((hands.get(Side::Left).unwrap().z() + 0.8).abs() < 1e-9);
}

#[test]
fn test_negative_convention_pipeline_punch() {
    let mut config = test_helpers::punch_config();
    config.normalization.depth_convention = DepthConvention::TowardCameraNegative;
    let (mut pipeline, _clock) = manual_pipeline(&config).unwrap();

    let mut events = Vec::new();
    for z in test_helpers::depth_ramp(0.9, 1.0, 4) {
        events.extend(pipeline.process_frame(&frame_with_hands(Some((0.0, 0.0, z)), None)).events);
    }
    assert_eq!(events.len(), 1);
    assert!((events[0].velocity - 0.1).abs() < 1e-6);
}

#[test]
fn test_calibration_window_limits_memory() {
    let config = NormalizationConfig {
        arm_length_window: 5,
        ..NormalizationConfig::default()
    };
    let mut normalizer = BodyNormalizer::new(&config).unwrap();

    // Long arms for a while, then a shorter player steps in
    let mut long_arms = upright_body();
    long_arms.wrist_left = RawJoint::tracked(-0.2, -0.35, 2.0);
    for _ in 0..10 {
        normalizer.normalize(Some(&long_arms));
    }
    assert!((normalizer.calibration(Side::Left).mean().unwrap() - 0.85).abs() < 1e-9);

    for _ in 0..5 {
        normalizer.normalize(Some(&upright_body()));
    }
    assert_eq!(normalizer.calibration(Side::Left).len(), 5);
    assert!((normalizer.calibration(Side::Left).mean().unwrap() - ARM_LENGTH).abs() < 1e-9);
}

#[test]
fn test_anchor_off_screen() {
    let mapper = ScreenMapper::new(1920, 1080).unwrap();
    let far = mapper.anchor(&NormalizedHand::new(2.0, -3.0, 0.0));
    assert_eq!(far, ScreenPoint::new(4800, 3780));
    assert!(!mapper.contains(far));

    let absurd = mapper.anchor(&NormalizedHand::new(1e12, f64::NAN, 0.0));
    assert_eq!(absurd.x, i32::MAX);
    assert_eq!(absurd.y, i32::MIN);
}

#[test]
fn test_alpha_clamping() {
    let mapping = AlphaMapping::default();
    assert_eq!(mapping.alpha(-1.0), 0);
    assert_eq!(mapping.alpha(0.0), 0);
    assert_eq!(mapping.alpha(5.0), 255);
    assert_eq!(mapping.alpha(f64::NAN), 0);

    let power = AlphaMapping::Power { scale: 1.0, exponent: 2.0 };
    assert_eq!(power.alpha(-0.5), 0);
    assert_eq!(power.alpha(0.5), 63);
}

#[test]
fn test_untracked_bodies_are_ignored() {
    let (mut pipeline, _clock) = manual_pipeline(&Config::default()).unwrap();
    let mut body = upright_body();
    body.tracked = false;

    let output = pipeline.process_frame(&SensorFrame::single(body));
    assert!(!output.hand(Side::Left).is_tracked());
    assert!(pipeline.normalizer().calibration(Side::Left).is_empty());
}
