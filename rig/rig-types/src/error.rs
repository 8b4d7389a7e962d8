//! Error types for skeleton construction.

use thiserror::Error;

/// Errors that can occur while constructing a skeleton.
///
/// All of these are fatal at construction time: a failed construction never
/// produces a partial skeleton.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkeletonError {
    /// The link-name table and parent table have different lengths.
    #[error("table length mismatch: {names} link names, {parents} parent entries")]
    TableLengthMismatch {
        /// Number of link names supplied.
        names: usize,
        /// Number of parent entries supplied.
        parents: usize,
    },

    /// No link qualifies as the root.
    #[error("no root link found (every link has a parent)")]
    NoRoot,

    /// More than one link qualifies as the root.
    #[error("multiple root links found: {0:?}")]
    MultipleRoots(Vec<String>),

    /// A parent index does not refer to a valid link.
    #[error("parent index {parent} of link '{link}' is out of range")]
    ParentOutOfRange {
        /// The link whose parent entry is invalid.
        link: String,
        /// The offending parent index.
        parent: i64,
    },

    /// The parent table contains a cycle.
    #[error("parent table contains a cycle involving link '{0}'")]
    Cycle(String),

    /// Two links share the same name.
    #[error("duplicate link name: {0}")]
    DuplicateLink(String),

    /// Two joints share the same name.
    #[error("duplicate joint name: {0}")]
    DuplicateJoint(String),

    /// A link is the child of more than one joint.
    #[error("link '{0}' is the child of more than one joint")]
    MultipleParents(String),

    /// A joint references a link name that was never declared.
    #[error("joint '{joint}' references undeclared link '{link}'")]
    UnknownLink {
        /// The undeclared link name.
        link: String,
        /// The joint that referenced it.
        joint: String,
    },
}

/// Result type for skeleton operations.
pub type Result<T> = std::result::Result<T, SkeletonError>;
