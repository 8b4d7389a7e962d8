//! Orientation solver: frames of world positions → local quaternions.

use nalgebra::{Point3, UnitQuaternion};
use rig_types::Skeleton;
use tracing::trace;

use crate::align::rotation_aligning;
use crate::error::{Result, SolveError};

/// Root positions within this distance of the origin keep the identity
/// orientation.
const ORIGIN_EPS: f64 = 1e-8;

/// Local orientations for one solved frame.
///
/// `locals[k]` belongs to the k-th non-root link in ascending link-index
/// order: with the root at index 0, the connection ending at link `i` lives
/// at `locals[i - 1]`. For arbitrary root positions,
/// [`Skeleton::joint_slot`] maps a link index to its slot. The root's own
/// orientation is a separate field, not element 0 of `locals`.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePose {
    /// Orientation of the root link, from the origin-to-root boundary rule.
    pub root_orientation: UnitQuaternion<f64>,
    /// Parent-relative orientation per connection.
    pub locals: Vec<UnitQuaternion<f64>>,
}

/// Converts world-space link positions into parent-relative orientations.
///
/// Construction precomputes everything static: per-connection rest
/// directions and a root-first dependency schedule, so each solve is a
/// single pass over the connections. The solver is purely functional over
/// its inputs; one instance can serve any number of frames, from any number
/// of threads.
#[derive(Debug, Clone)]
pub struct OrientationSolver {
    skeleton: Skeleton,
    /// Connection slots in breadth-first (root-first) order. Dependency
    /// order comes from the tree, never from index arithmetic: link
    /// declaration order may put children before parents.
    schedule: Vec<usize>,
    /// Per-slot slot of the parent's own connection; `None` when the parent
    /// link is the root.
    parent_slots: Vec<Option<usize>>,
    /// Per-slot rest direction, resolved once.
    rest_directions: Vec<nalgebra::Vector3<f64>>,
}

impl OrientationSolver {
    /// Create a solver for a skeleton.
    #[must_use]
    pub fn new(skeleton: Skeleton) -> Self {
        let joints = skeleton.joints();

        let rest_directions = joints
            .iter()
            .map(|j| skeleton.rest_direction(j.parent, j.child))
            .collect();

        let parent_slots = joints
            .iter()
            .map(|j| skeleton.joint_slot(j.parent))
            .collect();

        let mut schedule = Vec::with_capacity(joints.len());
        let mut queue = std::collections::VecDeque::from([skeleton.root()]);
        while let Some(link) = queue.pop_front() {
            for &child in skeleton.children_of(link) {
                if let Some(slot) = skeleton.joint_slot(child) {
                    schedule.push(slot);
                }
                queue.push_back(child);
            }
        }

        Self {
            skeleton,
            schedule,
            parent_slots,
            rest_directions,
        }
    }

    /// The skeleton this solver was built for.
    #[must_use]
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Solve one frame of world positions.
    ///
    /// Positions are index-aligned to the skeleton's links. Degenerate
    /// geometry (zero-length bones, antiparallel alignments) never fails;
    /// the alignment fallbacks keep every output a unit quaternion.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::ShapeMismatch`] when the position count does
    /// not equal the skeleton's link count.
    pub fn solve_frame(&self, positions: &[Point3<f64>]) -> Result<FramePose> {
        let expected = self.skeleton.len();
        if positions.len() != expected {
            return Err(SolveError::ShapeMismatch {
                expected,
                actual: positions.len(),
            });
        }

        let root = self.skeleton.root();
        let root_offset = positions[root].coords;
        let root_orientation = if root_offset.norm() < ORIGIN_EPS {
            UnitQuaternion::identity()
        } else {
            rotation_aligning(self.skeleton.root_rest_direction(), root_offset)
        };

        let joints = self.skeleton.joints();
        let mut world = vec![UnitQuaternion::identity(); joints.len()];
        let mut locals = vec![UnitQuaternion::identity(); joints.len()];

        for &slot in &self.schedule {
            let joint = &joints[slot];
            let observed = positions[joint.child] - positions[joint.parent];
            let orientation = rotation_aligning(self.rest_directions[slot], observed);
            world[slot] = orientation;
            locals[slot] = match self.parent_slots[slot] {
                // Connections off the root have nothing to subtract.
                None => orientation,
                Some(parent) => world[parent].conjugate() * orientation,
            };
        }

        Ok(FramePose {
            root_orientation,
            locals,
        })
    }

    /// Solve an ordered sequence of frames.
    ///
    /// Every frame's shape is validated before any frame is solved; frames
    /// are then solved independently, in order.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::FrameShapeMismatch`] naming the first frame
    /// whose position count disagrees with the skeleton.
    pub fn solve_animation<F>(&self, frames: &[F]) -> Result<Vec<FramePose>>
    where
        F: AsRef<[Point3<f64>]>,
    {
        self.validate_frames(frames)?;
        trace!(frames = frames.len(), "solving animation");
        frames
            .iter()
            .map(|frame| self.solve_frame(frame.as_ref()))
            .collect()
    }

    /// Solve frames in parallel across worker threads.
    ///
    /// Frames of an animation are independent: the skeleton is immutable
    /// shared state and each solve owns its buffers, so this is a plain
    /// data-parallel map. Output order matches input order.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::FrameShapeMismatch`] naming the first frame
    /// whose position count disagrees with the skeleton.
    #[cfg(feature = "parallel")]
    pub fn solve_animation_par<F>(&self, frames: &[F]) -> Result<Vec<FramePose>>
    where
        F: AsRef<[Point3<f64>]> + Sync,
    {
        use rayon::prelude::*;

        self.validate_frames(frames)?;
        trace!(frames = frames.len(), "solving animation in parallel");
        frames
            .par_iter()
            .map(|frame| self.solve_frame(frame.as_ref()))
            .collect()
    }

    /// Reject the whole animation before solving any frame.
    fn validate_frames<F>(&self, frames: &[F]) -> Result<()>
    where
        F: AsRef<[Point3<f64>]>,
    {
        let expected = self.skeleton.len();
        for (frame, positions) in frames.iter().enumerate() {
            let actual = positions.as_ref().len();
            if actual != expected {
                return Err(SolveError::FrameShapeMismatch {
                    frame,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}
