//! Skeleton model for converting world-space joint positions into rig-local
//! rotations.
//!
//! This crate holds the static side of the pipeline:
//!
//! - [`Skeleton`] - immutable link/parent table with one [`Joint`] record per
//!   parent→child connection
//! - [`SkeletonBuilder`] - assembly from named links and joints, used by
//!   topology loaders
//! - rest-pose direction classification - anatomical name buckets mapping
//!   each connection to its canonical (T-pose) unit direction
//! - [`Skeleton::metahuman`] - the canonical 68-bone table
//!
//! # Design Philosophy
//!
//! A `Skeleton` is **pure data plus queries**. It is constructed once,
//! validated eagerly (single root, in-range parents, acyclic, unique names)
//! and immutable afterwards, so solvers can share it read-only across
//! threads with no synchronization.
//!
//! # Coordinate System
//!
//! Right-handed, Y up: X is the character's left/right axis, Y is vertical,
//! Z is forward. Rest directions are expressed in this frame.
//!
//! # Example
//!
//! ```
//! use rig_types::Skeleton;
//!
//! let skeleton = Skeleton::metahuman();
//! assert_eq!(skeleton.len(), 68);
//!
//! // Every non-root link owns the connection to its parent.
//! let joint = skeleton.joint("clavicle_l_to_upperarm_l").expect("known joint");
//! let dir = skeleton.rest_direction(joint.parent, joint.child);
//! assert!(dir.x < 0.0); // left arm extends along -X in the T-pose
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for skeleton types.

#![doc(html_root_url = "https://docs.rs/rig-types/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

mod error;
mod metahuman;
mod rest_pose;
mod skeleton;

pub use error::{Result, SkeletonError};
pub use metahuman::METAHUMAN_BONES;
pub use skeleton::{Joint, Skeleton, SkeletonBuilder};

// Re-export math types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};
