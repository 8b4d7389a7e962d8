//! Error types for topology parsing and loading.

use thiserror::Error;

/// Errors that can occur while parsing, validating, or loading a topology
/// description.
///
/// All variants are fatal for the document being loaded: no partial skeleton
/// is ever produced.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// The document's root element is not `<robot>`.
    #[error("unexpected root element <{0}>, expected <robot>")]
    UnexpectedRootElement(String),

    /// Missing required element.
    #[error("missing required element: {element} in {context}")]
    MissingElement {
        /// The missing element name.
        element: &'static str,
        /// Where the element was expected.
        context: String,
    },

    /// Missing required attribute.
    #[error("missing required attribute: {attribute} on {element}")]
    MissingAttribute {
        /// The missing attribute name.
        attribute: &'static str,
        /// The element that should have the attribute.
        element: String,
    },

    /// A vector attribute did not parse as exactly three floats.
    #[error("invalid vector '{value}' in {context}: expected three floating-point components")]
    InvalidVector {
        /// The offending attribute value.
        value: String,
        /// Where the vector appeared.
        context: String,
    },

    /// Unknown joint type tag.
    #[error("unknown joint type: {0}")]
    UnknownJointKind(String),

    /// Reference to an undeclared link.
    #[error("reference to undefined link: {link} in joint {joint}")]
    UndefinedLink {
        /// The link name that was referenced.
        link: String,
        /// The joint that referenced it.
        joint: String,
    },

    /// Duplicate link name.
    #[error("duplicate link name: {0}")]
    DuplicateLink(String),

    /// Duplicate joint name.
    #[error("duplicate joint name: {0}")]
    DuplicateJoint(String),

    /// No root link found.
    #[error("no root link found (every link is the child of a joint)")]
    NoRootLink,

    /// Multiple root links found.
    #[error("multiple root links found: {0:?}")]
    MultipleRootLinks(Vec<String>),

    /// Kinematic loop detected.
    #[error("kinematic loop detected: {0}")]
    KinematicLoop(String),

    /// Skeleton construction rejected the validated document.
    #[error(transparent)]
    Skeleton(#[from] rig_types::SkeletonError),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TopologyError {
    /// Create a missing element error.
    pub fn missing_element(element: &'static str, context: impl Into<String>) -> Self {
        Self::MissingElement {
            element,
            context: context.into(),
        }
    }

    /// Create a missing attribute error.
    pub fn missing_attribute(attribute: &'static str, element: impl Into<String>) -> Self {
        Self::MissingAttribute {
            attribute,
            element: element.into(),
        }
    }

    /// Create an invalid vector error.
    pub fn invalid_vector(value: impl Into<String>, context: impl Into<String>) -> Self {
        Self::InvalidVector {
            value: value.into(),
            context: context.into(),
        }
    }

    /// Create an undefined link error.
    pub fn undefined_link(link: impl Into<String>, joint: impl Into<String>) -> Self {
        Self::UndefinedLink {
            link: link.into(),
            joint: joint.into(),
        }
    }
}

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, TopologyError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TopologyError::missing_element("parent", "joint 'j1'");
        assert!(err.to_string().contains("parent"));
        assert!(err.to_string().contains("j1"));
    }

    #[test]
    fn test_invalid_vector_display() {
        let err = TopologyError::invalid_vector("1 2", "axis of joint 'j'");
        assert!(err.to_string().contains("1 2"));
        assert!(err.to_string().contains("three floating-point"));
    }

    #[test]
    fn test_skeleton_error_wraps() {
        let err: TopologyError = rig_types::SkeletonError::NoRoot.into();
        assert!(matches!(err, TopologyError::Skeleton(_)));
    }
}
