//! Skeleton model: link table, joint records, and rest-direction queries.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SkeletonError};
use crate::rest_pose;

/// Vectors shorter than this are treated as degenerate and replaced by the
/// Z-axis fallback.
const DEGENERATE_NORM: f64 = 1e-8;

/// Safe direction normalization with Z fallback for zero-length vectors.
#[inline]
fn normalize_or_fallback(v: Vector3<f64>) -> Vector3<f64> {
    let norm = v.norm();
    if norm > DEGENERATE_NORM {
        v / norm
    } else {
        Vector3::z()
    }
}

/// One parent→child connection of the skeleton.
///
/// Every non-root link owns exactly one joint: the connection to its parent.
/// Joints are stored in ascending child-index order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Joint {
    /// Joint name, unique within the skeleton.
    pub name: String,
    /// Parent link index.
    pub parent: usize,
    /// Child link index.
    pub child: usize,
    /// Explicit rest-pose direction from the topology description.
    ///
    /// `None` means the direction is derived from name classification.
    /// When present this value is authoritative for the connection.
    pub rest_direction: Option<Vector3<f64>>,
}

/// An immutable articulated skeleton: a rooted tree of named links.
///
/// Constructed once, then shared read-only across solves. Link indices are
/// stable for the lifetime of the skeleton; index `0..len()` follows the
/// declaration order of the source table or topology document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Skeleton {
    link_names: Vec<String>,
    parents: Vec<Option<usize>>,
    root: usize,
    joints: Vec<Joint>,
    children: Vec<Vec<usize>>,
    joint_slots: Vec<Option<usize>>,
    root_rest_direction: Vector3<f64>,
}

impl Skeleton {
    /// Build a skeleton from a name table and a parent-index table.
    ///
    /// `parents[i]` is the parent index of link `i`, with `-1` marking the
    /// unique root. Joint names are generated as `"{parent}_to_{child}"` and
    /// all rest directions are left to name classification.
    ///
    /// # Errors
    ///
    /// Returns an error if the tables disagree in length, any parent index
    /// is out of range, there is not exactly one root, the table contains a
    /// cycle, or link names repeat.
    pub fn from_parent_table(names: &[&str], parents: &[i32]) -> Result<Self> {
        if names.len() != parents.len() {
            return Err(SkeletonError::TableLengthMismatch {
                names: names.len(),
                parents: parents.len(),
            });
        }

        let mut resolved: Vec<Option<usize>> = Vec::with_capacity(parents.len());
        for (i, &parent) in parents.iter().enumerate() {
            if parent == -1 {
                resolved.push(None);
            } else if parent >= 0 && (parent as usize) < names.len() {
                resolved.push(Some(parent as usize));
            } else {
                return Err(SkeletonError::ParentOutOfRange {
                    link: names[i].to_string(),
                    parent: i64::from(parent),
                });
            }
        }

        let link_names: Vec<String> = names.iter().map(|n| (*n).to_string()).collect();
        let joints = resolved
            .iter()
            .enumerate()
            .filter_map(|(child, parent)| {
                parent.map(|parent| Joint {
                    name: format!("{}_to_{}", link_names[parent], link_names[child]),
                    parent,
                    child,
                    rest_direction: None,
                })
            })
            .collect();

        Self::from_parts(link_names, resolved, joints, None)
    }

    /// Assemble and validate a skeleton from pre-resolved parts.
    ///
    /// `joints` must contain exactly one entry per non-root link, in
    /// ascending child-index order; both constructors guarantee this.
    fn from_parts(
        link_names: Vec<String>,
        parents: Vec<Option<usize>>,
        joints: Vec<Joint>,
        root_rest_direction: Option<Vector3<f64>>,
    ) -> Result<Self> {
        let n = link_names.len();

        let mut seen = std::collections::HashSet::new();
        for name in &link_names {
            if !seen.insert(name.as_str()) {
                return Err(SkeletonError::DuplicateLink(name.clone()));
            }
        }

        for (i, parent) in parents.iter().enumerate() {
            if let Some(p) = parent {
                if *p >= n {
                    return Err(SkeletonError::ParentOutOfRange {
                        link: link_names[i].clone(),
                        parent: *p as i64,
                    });
                }
            }
        }

        let roots: Vec<usize> = (0..n).filter(|&i| parents[i].is_none()).collect();
        let root = match roots.as_slice() {
            [] => return Err(SkeletonError::NoRoot),
            [root] => *root,
            _ => {
                return Err(SkeletonError::MultipleRoots(
                    roots.iter().map(|&i| link_names[i].clone()).collect(),
                ));
            }
        };

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (child, parent) in parents.iter().enumerate() {
            if let Some(p) = parent {
                children[*p].push(child);
            }
        }

        // Reachability from the root doubles as the cycle check: a link on a
        // parent cycle is never reached.
        let mut visited = vec![false; n];
        let mut queue = std::collections::VecDeque::from([root]);
        visited[root] = true;
        let mut reached = 1;
        while let Some(link) = queue.pop_front() {
            for &child in &children[link] {
                if !visited[child] {
                    visited[child] = true;
                    reached += 1;
                    queue.push_back(child);
                }
            }
        }
        if reached != n {
            let stranded = (0..n)
                .find(|&i| !visited[i])
                .map_or_else(String::new, |i| link_names[i].clone());
            return Err(SkeletonError::Cycle(stranded));
        }

        let mut joint_slots = vec![None; n];
        for (slot, joint) in joints.iter().enumerate() {
            joint_slots[joint.child] = Some(slot);
        }

        Ok(Self {
            link_names,
            parents,
            root,
            joints,
            children,
            joint_slots,
            root_rest_direction: root_rest_direction
                .map_or_else(Vector3::y, normalize_or_fallback),
        })
    }

    /// Number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.link_names.len()
    }

    /// True when the skeleton has no links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.link_names.is_empty()
    }

    /// Index of the root link.
    #[must_use]
    pub fn root(&self) -> usize {
        self.root
    }

    /// Parent link index, `None` for the root.
    #[must_use]
    pub fn parent_of(&self, link: usize) -> Option<usize> {
        self.parents[link]
    }

    /// Child link indices in ascending order; empty for leaves.
    #[must_use]
    pub fn children_of(&self, link: usize) -> &[usize] {
        &self.children[link]
    }

    /// Name of a link.
    #[must_use]
    pub fn link_name(&self, link: usize) -> &str {
        &self.link_names[link]
    }

    /// All link names in index order.
    pub fn link_names(&self) -> impl Iterator<Item = &str> {
        self.link_names.iter().map(String::as_str)
    }

    /// Look up a link index by name.
    #[must_use]
    pub fn link_index(&self, name: &str) -> Option<usize> {
        self.link_names.iter().position(|n| n == name)
    }

    /// All joints in ascending child-index order.
    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// All joint names, ordered like [`Self::joints`].
    pub fn joint_names(&self) -> impl Iterator<Item = &str> {
        self.joints.iter().map(|j| j.name.as_str())
    }

    /// Look up a joint record by name.
    #[must_use]
    pub fn joint(&self, name: &str) -> Option<&Joint> {
        self.joints.iter().find(|j| j.name == name)
    }

    /// Look up the joint whose child is the given link; `None` for the root.
    #[must_use]
    pub fn joint_by_child(&self, child: usize) -> Option<&Joint> {
        self.joint_slots[child].map(|slot| &self.joints[slot])
    }

    /// Position of a link's joint within [`Self::joints`]; `None` for the
    /// root. This is also the link's slot in solver output arrays.
    #[must_use]
    pub fn joint_slot(&self, link: usize) -> Option<usize> {
        self.joint_slots[link]
    }

    /// Rest direction used for the root's own orientation (default up).
    #[must_use]
    pub fn root_rest_direction(&self) -> Vector3<f64> {
        self.root_rest_direction
    }

    /// Rest-pose direction for the connection from `parent` to `child`.
    ///
    /// Total over any pair of valid link indices: adjacent connections use
    /// their explicit topology direction when one was supplied, everything
    /// else falls through to name classification, so the query never fails.
    /// Twist helpers inherit the direction of the connection feeding their
    /// parent, found by walking up the parent table (never recursing).
    /// Returned vectors are always unit length; degenerate explicit
    /// directions fall back to the Z axis.
    #[must_use]
    pub fn rest_direction(&self, parent: usize, child: usize) -> Vector3<f64> {
        let (parent, child) = self.twist_source(parent, child);
        if let Some(joint) = self.joint_by_child(child) {
            if joint.parent == parent {
                if let Some(direction) = joint.rest_direction {
                    return normalize_or_fallback(direction);
                }
            }
        }
        rest_pose::classified_direction(self.link_name(child))
    }

    /// Resolve the connection a twist helper inherits from.
    ///
    /// Walks up the parent table while the child is a twist bone; bounded by
    /// tree depth since the skeleton is acyclic.
    fn twist_source(&self, parent: usize, child: usize) -> (usize, usize) {
        let mut parent = parent;
        let mut child = child;
        while rest_pose::is_twist(self.link_name(child)) {
            match self.parents[parent] {
                Some(grandparent) => {
                    child = parent;
                    parent = grandparent;
                }
                None => break,
            }
        }
        (parent, child)
    }
}

/// Pending joint inside [`SkeletonBuilder`], keyed by link names.
#[derive(Debug, Clone)]
struct PendingJoint {
    name: String,
    parent: String,
    child: String,
    rest_direction: Option<Vector3<f64>>,
}

/// Builder for skeletons assembled from named links and joints, used by
/// topology loaders.
///
/// ```
/// use rig_types::SkeletonBuilder;
///
/// let skeleton = SkeletonBuilder::new()
///     .link("root")
///     .link("pelvis")
///     .joint("root_to_pelvis", "root", "pelvis")
///     .build()
///     .expect("valid two-link chain");
///
/// assert_eq!(skeleton.len(), 2);
/// assert_eq!(skeleton.root(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SkeletonBuilder {
    links: Vec<String>,
    joints: Vec<PendingJoint>,
    root_rest_direction: Option<Vector3<f64>>,
}

impl SkeletonBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a link; declaration order defines link indices.
    #[must_use]
    pub fn link(mut self, name: impl Into<String>) -> Self {
        self.links.push(name.into());
        self
    }

    /// Declare a joint between two previously declared links.
    #[must_use]
    pub fn joint(
        mut self,
        name: impl Into<String>,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        self.joints.push(PendingJoint {
            name: name.into(),
            parent: parent.into(),
            child: child.into(),
            rest_direction: None,
        });
        self
    }

    /// Declare a joint carrying an explicit rest-pose direction.
    #[must_use]
    pub fn joint_with_direction(
        mut self,
        name: impl Into<String>,
        parent: impl Into<String>,
        child: impl Into<String>,
        direction: Vector3<f64>,
    ) -> Self {
        self.joints.push(PendingJoint {
            name: name.into(),
            parent: parent.into(),
            child: child.into(),
            rest_direction: Some(direction),
        });
        self
    }

    /// Override the root's rest direction (default up).
    #[must_use]
    pub fn root_rest_direction(mut self, direction: Vector3<f64>) -> Self {
        self.root_rest_direction = Some(direction);
        self
    }

    /// Resolve names and build the skeleton.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate link or joint names, joints referencing
    /// undeclared links, a link with more than one parent, zero or multiple
    /// roots, or a cyclic structure.
    pub fn build(self) -> Result<Skeleton> {
        let n = self.links.len();

        let mut index_of = std::collections::HashMap::with_capacity(n);
        for (i, name) in self.links.iter().enumerate() {
            if index_of.insert(name.as_str(), i).is_some() {
                return Err(SkeletonError::DuplicateLink(name.clone()));
            }
        }

        let mut joint_names = std::collections::HashSet::with_capacity(self.joints.len());
        for joint in &self.joints {
            if !joint_names.insert(joint.name.as_str()) {
                return Err(SkeletonError::DuplicateJoint(joint.name.clone()));
            }
        }

        let mut parents: Vec<Option<usize>> = vec![None; n];
        let mut resolved: Vec<Joint> = Vec::with_capacity(self.joints.len());
        for joint in &self.joints {
            let parent = *index_of.get(joint.parent.as_str()).ok_or_else(|| {
                SkeletonError::UnknownLink {
                    link: joint.parent.clone(),
                    joint: joint.name.clone(),
                }
            })?;
            let child = *index_of.get(joint.child.as_str()).ok_or_else(|| {
                SkeletonError::UnknownLink {
                    link: joint.child.clone(),
                    joint: joint.name.clone(),
                }
            })?;
            if parents[child].is_some() {
                return Err(SkeletonError::MultipleParents(joint.child.clone()));
            }
            parents[child] = Some(parent);
            resolved.push(Joint {
                name: joint.name.clone(),
                parent,
                child,
                rest_direction: joint.rest_direction,
            });
        }

        resolved.sort_by_key(|j| j.child);

        Skeleton::from_parts(self.links, parents, resolved, self.root_rest_direction)
    }
}
