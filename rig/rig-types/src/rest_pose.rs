//! Rest-pose (T-pose) direction classification.
//!
//! When the topology description does not carry an explicit rest direction
//! for a connection, the direction is derived from the child link's name.
//! Link names are bucketed into anatomical classes and a body side, and each
//! class maps to a fixed unit vector in the canonical pose.
//!
//! The rules are evaluated first-match in the order they appear in
//! [`classified_direction`]; the order is part of the contract and must not
//! be reshuffled. Classification is total: every name resolves to exactly
//! one direction, with "up" as the terminal default.

use nalgebra::Vector3;

/// Thumbs splay a fixed 30 degrees from the finger axis toward forward.
const THUMB_SPLAY_COS: f64 = 0.866_025_403_784_438_6;
const THUMB_SPLAY_SIN: f64 = 0.5;

/// Which side of the body a link belongs to, read from the `_l`/`_r` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
    Center,
}

/// Anatomical bucket for a link name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BoneClass {
    /// Pelvis, spine, neck, head: the vertical trunk chain.
    Trunk,
    /// Shoulder girdle.
    Clavicle,
    /// Upper arm, lower arm, hand.
    Arm,
    /// Thumb segments.
    Thumb,
    /// Index, middle, ring, pinky segments.
    Finger,
    /// Thigh, calf, foot: the descending leg chain.
    Leg,
    /// Toe (ball) bones.
    Toe,
    /// Jaw and eyes.
    Face,
    /// Chest accessories.
    Chest,
    /// Twist helper bones; direction is inherited from the parent
    /// connection, resolved by the skeleton's parent-table walk.
    Twist,
    /// IK helper bones.
    IkHelper,
    /// Anything unrecognized, including the root itself.
    Other,
}

pub(crate) fn side_of(name: &str) -> Side {
    if name.ends_with("_l") {
        Side::Left
    } else if name.ends_with("_r") {
        Side::Right
    } else {
        Side::Center
    }
}

pub(crate) fn class_of(name: &str) -> BoneClass {
    let name = name.to_ascii_lowercase();
    if name.starts_with("twist") {
        BoneClass::Twist
    } else if name.starts_with("ik_") {
        BoneClass::IkHelper
    } else if name.starts_with("pelvis")
        || name.starts_with("spine")
        || name.starts_with("neck")
        || name.starts_with("head")
    {
        BoneClass::Trunk
    } else if name.starts_with("clavicle") {
        BoneClass::Clavicle
    } else if name.starts_with("upperarm") || name.starts_with("lowerarm") || name.starts_with("hand")
    {
        BoneClass::Arm
    } else if name.starts_with("thumb") {
        BoneClass::Thumb
    } else if name.starts_with("index")
        || name.starts_with("middle")
        || name.starts_with("ring")
        || name.starts_with("pinky")
    {
        BoneClass::Finger
    } else if name.starts_with("thigh") || name.starts_with("calf") || name.starts_with("foot") {
        BoneClass::Leg
    } else if name.starts_with("ball") || name.starts_with("toe") {
        BoneClass::Toe
    } else if name.starts_with("jaw") || name.starts_with("eye") {
        BoneClass::Face
    } else if name.starts_with("breast") {
        BoneClass::Chest
    } else {
        BoneClass::Other
    }
}

/// True when the link is a twist helper, whose direction follows its parent
/// connection.
pub(crate) fn is_twist(name: &str) -> bool {
    class_of(name) == BoneClass::Twist
}

/// Rest direction for the connection ending at `child_name`.
///
/// Priority order: twist (resolved upstream by the caller's parent-table
/// walk; seen here only for isolated names, mapped to up), IK helpers,
/// trunk chain, shoulder girdle and arm chain, thumbs, fingers, leg chain,
/// toes, face, chest, then the "up" default. All returned vectors are unit
/// length by construction.
pub(crate) fn classified_direction(child_name: &str) -> Vector3<f64> {
    let side = side_of(child_name);
    match class_of(child_name) {
        BoneClass::Trunk | BoneClass::IkHelper | BoneClass::Twist | BoneClass::Other => {
            Vector3::new(0.0, 1.0, 0.0)
        }
        BoneClass::Clavicle | BoneClass::Arm | BoneClass::Finger => lateral(side),
        BoneClass::Thumb => match side {
            Side::Left => Vector3::new(-THUMB_SPLAY_COS, 0.0, THUMB_SPLAY_SIN),
            Side::Right => Vector3::new(THUMB_SPLAY_COS, 0.0, THUMB_SPLAY_SIN),
            Side::Center => Vector3::new(0.0, 1.0, 0.0),
        },
        BoneClass::Leg => Vector3::new(0.0, -1.0, 0.0),
        BoneClass::Toe | BoneClass::Face | BoneClass::Chest => Vector3::new(0.0, 0.0, 1.0),
    }
}

/// Arms and fingers extend sideways in the T-pose; sideless names keep the
/// "up" default so classification stays total.
fn lateral(side: Side) -> Vector3<f64> {
    match side {
        Side::Left => Vector3::new(-1.0, 0.0, 0.0),
        Side::Right => Vector3::new(1.0, 0.0, 0.0),
        Side::Center => Vector3::new(0.0, 1.0, 0.0),
    }
}
