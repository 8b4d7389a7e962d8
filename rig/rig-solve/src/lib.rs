//! Orientation solver: world-space joint positions → rig-local quaternions.
//!
//! Given a [`rig_types::Skeleton`] and frames of absolute link positions
//! (motion capture, pose estimation), this crate computes, per parent→child
//! connection, the rotation from the connection's rest-pose direction to
//! its observed direction, and composes those world orientations into
//! parent-relative locals, the quantity a standard skeletal-animation rig
//! consumes.
//!
//! - [`rotation_aligning`] - minimal-angle rotation between two directions,
//!   with explicit degenerate-alignment handling
//! - [`OrientationSolver`] - per-frame and per-animation solving over an
//!   immutable skeleton
//! - [`FramePose`] - root orientation plus one local quaternion per
//!   connection
//!
//! # Concurrency
//!
//! The solver is purely functional over its inputs: the skeleton is
//! immutable shared state and every solve allocates its own buffers.
//! Frames of an animation are independent; the `parallel` feature adds
//! [`OrientationSolver::solve_animation_par`], a rayon map over frames.
//!
//! # Example
//!
//! ```
//! use nalgebra::Point3;
//! use rig_solve::OrientationSolver;
//! use rig_types::Skeleton;
//!
//! let skeleton = Skeleton::from_parent_table(
//!     &["root", "pelvis", "spine_01"],
//!     &[-1, 0, 1],
//! ).expect("valid chain");
//! let solver = OrientationSolver::new(skeleton);
//!
//! // A pure upward stretch reproduces the rest pose: identity everywhere.
//! let pose = solver.solve_frame(&[
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(0.0, 0.1, 0.0),
//!     Point3::new(0.0, 0.3, 0.0),
//! ]).expect("should solve");
//!
//! assert!((pose.locals[0].quaternion().w - 1.0).abs() < 1e-9);
//! ```
//!
//! # Feature Flags
//!
//! - `parallel`: Enable rayon-based animation solving.

#![doc(html_root_url = "https://docs.rs/rig-solve/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

mod align;
mod error;
mod solver;

pub use align::{normalize_or_fallback, rotation_aligning};
pub use error::{Result, SolveError};
pub use solver::{FramePose, OrientationSolver};
