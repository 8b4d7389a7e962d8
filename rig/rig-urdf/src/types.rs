//! Intermediate representation for parsed topology documents.
//!
//! These types mirror the document schema before conversion into a
//! [`rig_types::Skeleton`]: an ordered link list (position defines the link
//! index) and an ordered joint list carrying the per-connection attributes.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Joint type tag from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JointKind {
    /// Single-axis rotation with limits.
    Revolute,
    /// Single-axis rotation without limits.
    Continuous,
    /// Single-axis translation.
    Prismatic,
    /// No relative motion.
    Fixed,
    /// 6 DOF floating attachment.
    Floating,
    /// Translation in a plane.
    Planar,
    /// Ball-and-socket rotation.
    Spherical,
}

impl JointKind {
    /// Parse a document type tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "revolute" => Some(Self::Revolute),
            "continuous" => Some(Self::Continuous),
            "prismatic" => Some(Self::Prismatic),
            "fixed" => Some(Self::Fixed),
            "floating" => Some(Self::Floating),
            "planar" => Some(Self::Planar),
            "spherical" => Some(Self::Spherical),
            _ => None,
        }
    }
}

impl std::fmt::Display for JointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Revolute => write!(f, "revolute"),
            Self::Continuous => write!(f, "continuous"),
            Self::Prismatic => write!(f, "prismatic"),
            Self::Fixed => write!(f, "fixed"),
            Self::Floating => write!(f, "floating"),
            Self::Planar => write!(f, "planar"),
            Self::Spherical => write!(f, "spherical"),
        }
    }
}

/// One `<link>` element: a named skeletal landmark.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkDescription {
    /// Unique link name; list position defines the link index.
    pub name: String,
}

impl LinkDescription {
    /// Create a link description.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One `<joint>` element: a named parent→child connection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointDescription {
    /// Unique joint name.
    pub name: String,
    /// Joint type tag.
    pub kind: JointKind,
    /// Parent link name.
    pub parent: String,
    /// Child link name.
    pub child: String,
    /// Rotation axis; defaults to Z when the document omits it.
    pub axis: Vector3<f64>,
    /// Optional position offset from the parent.
    pub origin: Option<Vector3<f64>>,
    /// Optional explicit T-pose direction from parent to child.
    ///
    /// Absent means the rest direction is derived from name classification
    /// downstream.
    pub rest_direction: Option<Vector3<f64>>,
}

impl JointDescription {
    /// Create a joint description with default axis and no offsets.
    pub fn new(
        name: impl Into<String>,
        kind: JointKind,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: parent.into(),
            child: child.into(),
            axis: Vector3::z(),
            origin: None,
            rest_direction: None,
        }
    }

    /// Set the rotation axis.
    #[must_use]
    pub fn with_axis(mut self, axis: Vector3<f64>) -> Self {
        self.axis = axis;
        self
    }

    /// Set the position offset.
    #[must_use]
    pub fn with_origin(mut self, origin: Vector3<f64>) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Set the explicit T-pose direction.
    #[must_use]
    pub fn with_rest_direction(mut self, direction: Vector3<f64>) -> Self {
        self.rest_direction = Some(direction);
        self
    }
}

/// A parsed topology document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RobotDescription {
    /// Robot/skeleton name from the root element.
    pub name: String,
    /// Links in declaration order.
    pub links: Vec<LinkDescription>,
    /// Joints in declaration order.
    pub joints: Vec<JointDescription>,
}

impl RobotDescription {
    /// Create an empty description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: Vec::new(),
            joints: Vec::new(),
        }
    }

    /// Append a link.
    #[must_use]
    pub fn with_link(mut self, link: LinkDescription) -> Self {
        self.links.push(link);
        self
    }

    /// Append a joint.
    #[must_use]
    pub fn with_joint(mut self, joint: JointDescription) -> Self {
        self.joints.push(joint);
        self
    }

    /// Look up a link by name.
    #[must_use]
    pub fn link(&self, name: &str) -> Option<&LinkDescription> {
        self.links.iter().find(|l| l.name == name)
    }

    /// Look up a joint by name.
    #[must_use]
    pub fn joint(&self, name: &str) -> Option<&JointDescription> {
        self.joints.iter().find(|j| j.name == name)
    }

    /// All link names in declaration order.
    pub fn link_names(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(|l| l.name.as_str())
    }

    /// All joint names in declaration order.
    pub fn joint_names(&self) -> impl Iterator<Item = &str> {
        self.joints.iter().map(|j| j.name.as_str())
    }
}
