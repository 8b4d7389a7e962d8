//! Topology loader: URDF-flavored XML → validated [`rig_types::Skeleton`].
//!
//! This crate parses skeleton topology documents and converts them into
//! the immutable skeleton model consumed by the orientation solver:
//!
//! - [`parse_topology_str`] - XML into the [`RobotDescription`] IR
//! - [`validate`] - structural checks (single root, no cycles, resolved
//!   references) with every deviation reported
//! - [`SkeletonLoader`] / [`load_skeleton_str`] / [`load_skeleton_file`] -
//!   the full parse → validate → build pipeline
//! - [`metahuman_urdf`] - the canonical skeleton rendered as a document
//!
//! # Document schema
//!
//! ```xml
//! <robot name="biped">
//!     <link name="root"/>
//!     <link name="pelvis"/>
//!     <joint name="root_to_pelvis" type="revolute">
//!         <parent link="root"/>
//!         <child link="pelvis"/>
//!         <axis xyz="0 0 1"/>
//!         <origin xyz="0 0.1 0"/>
//!         <tpose_direction xyz="0 1 0"/>
//!     </joint>
//! </robot>
//! ```
//!
//! `axis` defaults to `(0,0,1)`; `origin` and `tpose_direction` are
//! optional. An explicit `tpose_direction` is authoritative for its
//! connection; absent, the rest direction comes from the skeleton's name
//! classification.
//!
//! # Example
//!
//! ```
//! use rig_urdf::load_skeleton_str;
//!
//! let xml = r#"
//!     <robot name="chain">
//!         <link name="root"/>
//!         <link name="pelvis"/>
//!         <joint name="root_to_pelvis" type="revolute">
//!             <parent link="root"/>
//!             <child link="pelvis"/>
//!         </joint>
//!     </robot>
//! "#;
//!
//! let skeleton = load_skeleton_str(xml).expect("should load");
//! assert_eq!(skeleton.len(), 2);
//! assert_eq!(skeleton.root(), 0);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for the IR types.

#![doc(html_root_url = "https://docs.rs/rig-urdf/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

mod canonical;
mod error;
mod loader;
mod parser;
mod types;
mod validation;

pub use canonical::metahuman_urdf;
pub use error::{Result, TopologyError};
pub use loader::{SkeletonLoader, load_skeleton_file, load_skeleton_str};
pub use parser::parse_topology_str;
pub use types::{JointDescription, JointKind, LinkDescription, RobotDescription};
pub use validation::{ValidationSummary, validate};
