//! Canonical MetaHuman bone table.
//!
//! 68 bones: the 67 main skeleton bones plus the root. Entry order defines
//! the link index; the second element is the parent index, `-1` for the
//! root.

use crate::skeleton::Skeleton;

/// `(name, parent index)` for every bone of the canonical skeleton.
pub const METAHUMAN_BONES: [(&str, i32); 68] = [
    ("root", -1),
    ("pelvis", 0),
    ("spine_01", 1),
    ("spine_02", 2),
    ("spine_03", 3),
    ("neck_01", 4),
    ("head", 5),
    ("clavicle_l", 4),
    ("upperarm_l", 7),
    ("lowerarm_l", 8),
    ("hand_l", 9),
    ("thumb_01_l", 10),
    ("thumb_02_l", 11),
    ("thumb_03_l", 12),
    ("index_01_l", 10),
    ("index_02_l", 14),
    ("index_03_l", 15),
    ("middle_01_l", 10),
    ("middle_02_l", 17),
    ("middle_03_l", 18),
    ("ring_01_l", 10),
    ("ring_02_l", 20),
    ("ring_03_l", 21),
    ("pinky_01_l", 10),
    ("pinky_02_l", 23),
    ("pinky_03_l", 24),
    ("clavicle_r", 4),
    ("upperarm_r", 26),
    ("lowerarm_r", 27),
    ("hand_r", 28),
    ("thumb_01_r", 29),
    ("thumb_02_r", 30),
    ("thumb_03_r", 31),
    ("index_01_r", 29),
    ("index_02_r", 33),
    ("index_03_r", 34),
    ("middle_01_r", 29),
    ("middle_02_r", 36),
    ("middle_03_r", 37),
    ("ring_01_r", 29),
    ("ring_02_r", 39),
    ("ring_03_r", 40),
    ("pinky_01_r", 29),
    ("pinky_02_r", 42),
    ("pinky_03_r", 43),
    ("thigh_l", 1),
    ("calf_l", 45),
    ("foot_l", 46),
    ("ball_l", 47),
    ("thigh_r", 1),
    ("calf_r", 49),
    ("foot_r", 50),
    ("ball_r", 51),
    ("ik_foot_root", 0),
    ("ik_foot_l", 53),
    ("ik_foot_r", 53),
    ("ik_hand_root", 0),
    ("ik_hand_gun", 56),
    ("ik_hand_l", 56),
    ("ik_hand_r", 56),
    ("jaw", 6),
    ("eye_l", 6),
    ("eye_r", 6),
    ("breast_l", 4),
    ("breast_r", 4),
    ("twist_01_thigh_l", 45),
    ("twist_01_thigh_r", 49),
    ("twist_01_upperarm_l", 8),
];

impl Skeleton {
    /// The canonical 68-bone MetaHuman skeleton.
    ///
    /// Joint names follow the `"{parent}_to_{child}"` scheme
    /// (`root_to_pelvis`, `clavicle_l_to_upperarm_l`, ...); rest directions
    /// come from name classification.
    #[must_use]
    pub fn metahuman() -> Self {
        let names: Vec<&str> = METAHUMAN_BONES.iter().map(|(name, _)| *name).collect();
        let parents: Vec<i32> = METAHUMAN_BONES.iter().map(|(_, parent)| *parent).collect();
        match Self::from_parent_table(&names, &parents) {
            Ok(skeleton) => skeleton,
            Err(_) => unreachable!("canonical bone table satisfies every construction invariant"),
        }
    }
}
