//! Topology document to skeleton conversion.

use std::path::Path;

use nalgebra::Vector3;
use rig_types::{Skeleton, SkeletonBuilder};
use tracing::debug;

use crate::error::Result;
use crate::parser::parse_topology_str;
use crate::types::RobotDescription;
use crate::validation::validate;

/// Topology loader with configuration options.
#[derive(Debug, Clone)]
pub struct SkeletonLoader {
    /// Whether `<tpose_direction>` elements in the document override name
    /// classification (default: true). When false every connection falls
    /// back to classification, reproducing the classification-only behavior.
    pub use_document_directions: bool,
    /// Rest direction used for the root's own orientation (default: up).
    pub root_rest_direction: Vector3<f64>,
}

impl Default for SkeletonLoader {
    fn default() -> Self {
        Self {
            use_document_directions: true,
            root_rest_direction: Vector3::y(),
        }
    }
}

impl SkeletonLoader {
    /// Create a loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether document directions override classification.
    #[must_use]
    pub fn with_document_directions(mut self, use_directions: bool) -> Self {
        self.use_document_directions = use_directions;
        self
    }

    /// Set the root rest direction.
    #[must_use]
    pub fn with_root_rest_direction(mut self, direction: Vector3<f64>) -> Self {
        self.root_rest_direction = direction;
        self
    }

    /// Load a skeleton from a topology file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Skeleton> {
        let content = std::fs::read_to_string(path)?;
        self.load_str(&content)
    }

    /// Load a skeleton from a topology string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or validation fails.
    pub fn load_str(&self, xml: &str) -> Result<Skeleton> {
        let robot = parse_topology_str(xml)?;
        self.load_robot(robot)
    }

    /// Load a skeleton from an already-parsed document.
    ///
    /// # Errors
    ///
    /// Returns an error if structural validation or skeleton construction
    /// fails.
    pub fn load_robot(&self, robot: RobotDescription) -> Result<Skeleton> {
        validate(&robot)?;

        let mut builder = SkeletonBuilder::new();
        for link in &robot.links {
            builder = builder.link(&link.name);
        }
        for joint in &robot.joints {
            builder = match joint.rest_direction {
                Some(direction) if self.use_document_directions => builder.joint_with_direction(
                    &joint.name,
                    &joint.parent,
                    &joint.child,
                    direction,
                ),
                _ => builder.joint(&joint.name, &joint.parent, &joint.child),
            };
        }
        builder = builder.root_rest_direction(self.root_rest_direction);

        let skeleton = builder.build()?;
        debug!(
            robot = %robot.name,
            links = skeleton.len(),
            joints = skeleton.joints().len(),
            "loaded skeleton topology"
        );
        Ok(skeleton)
    }
}

/// Convenience function to load a topology file with default settings.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_skeleton_file(path: impl AsRef<Path>) -> Result<Skeleton> {
    SkeletonLoader::default().load_file(path)
}

/// Convenience function to load a topology string with default settings.
///
/// # Errors
///
/// Returns an error if parsing fails.
pub fn load_skeleton_str(xml: &str) -> Result<Skeleton> {
    SkeletonLoader::default().load_str(xml)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::TopologyError;
    use approx::assert_relative_eq;

    const SIMPLE_BIPED: &str = r#"
        <robot name="biped">
            <link name="root"/>
            <link name="pelvis"/>
            <link name="thigh_l"/>
            <link name="thigh_r"/>
            <joint name="root_to_pelvis" type="revolute">
                <parent link="root"/>
                <child link="pelvis"/>
                <tpose_direction xyz="0 1 0"/>
            </joint>
            <joint name="pelvis_to_thigh_l" type="spherical">
                <parent link="pelvis"/>
                <child link="thigh_l"/>
            </joint>
            <joint name="pelvis_to_thigh_r" type="spherical">
                <parent link="pelvis"/>
                <child link="thigh_r"/>
                <tpose_direction xyz="0 0 -1"/>
            </joint>
        </robot>
    "#;

    #[test]
    fn test_load_simple_biped() {
        let skeleton = load_skeleton_str(SIMPLE_BIPED).expect("should load");
        assert_eq!(skeleton.len(), 4);
        assert_eq!(skeleton.root(), 0);
        assert_eq!(skeleton.link_index("thigh_r"), Some(3));
        assert!(skeleton.joint("pelvis_to_thigh_l").is_some());
    }

    #[test]
    fn test_document_direction_is_authoritative() {
        let skeleton = load_skeleton_str(SIMPLE_BIPED).expect("should load");
        // thigh_r carries an explicit direction that contradicts the leg
        // classification; the document wins.
        let dir = skeleton.rest_direction(1, 3);
        assert_relative_eq!(dir.z, -1.0, epsilon = 1e-12);
        // thigh_l has no explicit direction and classifies down.
        let dir = skeleton.rest_direction(1, 2);
        assert_relative_eq!(dir.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_classification_only_mode() {
        let loader = SkeletonLoader::new().with_document_directions(false);
        let skeleton = loader.load_str(SIMPLE_BIPED).expect("should load");
        // With document directions ignored, thigh_r classifies down too.
        let dir = skeleton.rest_direction(1, 3);
        assert_relative_eq!(dir.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_root_rest_direction_override() {
        let loader = SkeletonLoader::new().with_root_rest_direction(Vector3::z());
        let skeleton = loader.load_str(SIMPLE_BIPED).expect("should load");
        assert_relative_eq!(skeleton.root_rest_direction().z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_validation_runs_before_building() {
        let xml = r#"
            <robot name="broken">
                <link name="a"/>
                <joint name="j" type="fixed">
                    <parent link="a"/>
                    <child link="ghost"/>
                </joint>
            </robot>
        "#;
        let result = load_skeleton_str(xml);
        assert!(matches!(result, Err(TopologyError::UndefinedLink { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = load_skeleton_file("/nonexistent/skeleton.urdf");
        assert!(matches!(result, Err(TopologyError::Io(_))));
    }

    #[test]
    fn test_empty_robot_has_no_root() {
        let result = load_skeleton_str(r#"<robot name="empty"/>"#);
        assert!(matches!(result, Err(TopologyError::NoRootLink)));
    }
}
