//! Minimal-angle rotation between two directions.
//!
//! The numerically delicate core of the solver: a quaternion mapping one
//! unit vector onto another, with explicit handling of the two degenerate
//! alignments. Near-parallel inputs collapse to the identity; near
//! antiparallel inputs have no unique rotation axis, so one is constructed
//! from a fixed helper axis.

use nalgebra::{Unit, UnitQuaternion, Vector3};

/// Dot products within this distance of ±1 take the degenerate branches.
const ALIGNMENT_EPS: f64 = 1e-6;

/// Vectors shorter than this are degenerate and replaced by the Z axis.
const DEGENERATE_NORM: f64 = 1e-8;

/// Safe direction normalization with Z fallback for zero-length vectors.
#[inline]
#[must_use]
pub fn normalize_or_fallback(v: Vector3<f64>) -> Vector3<f64> {
    let norm = v.norm();
    if norm > DEGENERATE_NORM {
        v / norm
    } else {
        Vector3::z()
    }
}

/// Minimal-angle rotation carrying `from` onto `to`.
///
/// Inputs need not be normalized; degenerate inputs fall back to the Z
/// axis. The result is always a valid unit quaternion:
///
/// - antiparallel inputs rotate 180° about an axis built from the cross
///   product of `from` with the helper axis `(1,0,0)`, swapped to `(0,0,1)`
///   when the helper is nearly parallel to `from`;
/// - parallel inputs yield the identity;
/// - everything else uses the trigonometric construction
///   `(cos θ/2, axis·sin θ/2)` with `axis = from × to` normalized.
#[must_use]
pub fn rotation_aligning(from: Vector3<f64>, to: Vector3<f64>) -> UnitQuaternion<f64> {
    let from = normalize_or_fallback(from);
    let to = normalize_or_fallback(to);

    let dot = from.dot(&to).clamp(-1.0, 1.0);

    if dot < -1.0 + ALIGNMENT_EPS {
        // 180°: no unique axis, derive one orthogonal to `from`.
        let helper = if from.x.abs() > 0.9 {
            Vector3::z()
        } else {
            Vector3::x()
        };
        let axis = Unit::new_normalize(from.cross(&helper));
        UnitQuaternion::from_axis_angle(&axis, std::f64::consts::PI)
    } else if dot > 1.0 - ALIGNMENT_EPS {
        UnitQuaternion::identity()
    } else {
        let axis = Unit::new_normalize(from.cross(&to));
        UnitQuaternion::from_axis_angle(&axis, dot.acos())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Quaternion;

    fn quat_norm(q: &UnitQuaternion<f64>) -> f64 {
        q.quaternion().norm()
    }

    #[test]
    fn test_parallel_is_identity() {
        let q = rotation_aligning(Vector3::y(), Vector3::y());
        assert_relative_eq!(q.quaternion().w, 1.0, epsilon = 1e-12);

        // Magnitude does not matter.
        let q = rotation_aligning(Vector3::new(0.0, 2.0, 0.0), Vector3::new(0.0, 0.001, 0.0));
        assert_relative_eq!(q.quaternion().w, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_quarter_turn() {
        let q = rotation_aligning(Vector3::y(), Vector3::x());
        assert_relative_eq!(q.angle(), std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        let rotated = q * Vector3::y();
        assert_relative_eq!(rotated.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(rotated.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_maps_from_onto_to() {
        let cases = [
            (Vector3::new(0.0, 1.0, 0.0), Vector3::new(1.0, 1.0, 0.0)),
            (Vector3::new(0.0, 1.0, 0.0), Vector3::new(0.3, -0.2, 0.9)),
            (Vector3::new(-1.0, 0.0, 0.0), Vector3::new(0.0, 0.5, 0.5)),
            (Vector3::new(0.2, 0.3, 0.4), Vector3::new(-0.4, 0.1, 0.2)),
        ];
        for (from, to) in cases {
            let q = rotation_aligning(from, to);
            let rotated = q * normalize_or_fallback(from);
            let expected = normalize_or_fallback(to);
            assert_relative_eq!(rotated.x, expected.x, epsilon = 1e-9);
            assert_relative_eq!(rotated.y, expected.y, epsilon = 1e-9);
            assert_relative_eq!(rotated.z, expected.z, epsilon = 1e-9);
            assert_relative_eq!(quat_norm(&q), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_antiparallel_x_uses_z_helper() {
        // The primary helper (1,0,0) is parallel to `from`, so the axis must
        // come from the (0,0,1) helper and be orthogonal to `from`.
        let q = rotation_aligning(Vector3::x(), -Vector3::x());
        let q = q.quaternion();
        assert_relative_eq!(q.w, 0.0, epsilon = 1e-9);

        let vector = Vector3::new(q.i, q.j, q.k);
        assert_relative_eq!(vector.norm(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(vector.dot(&Vector3::x()), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_antiparallel_y_uses_x_helper() {
        let q = rotation_aligning(Vector3::y(), -Vector3::y());
        let rotated = q * Vector3::y();
        assert_relative_eq!(rotated.y, -1.0, epsilon = 1e-9);
        assert_relative_eq!(quat_norm(&q), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_vector_falls_back_to_z() {
        // A zero `to` becomes +Z; aligning +Y onto it is a quarter turn.
        let q = rotation_aligning(Vector3::y(), Vector3::zeros());
        let rotated = q * Vector3::y();
        assert_relative_eq!(rotated.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_matches_algebraic_construction() {
        // The trig-free form (w = 1 + d, vector = from × to, normalize the
        // 4-vector) must agree with the shipped construction away from the
        // degenerate branches.
        let from = Vector3::new(0.0, 1.0, 0.0);
        for deg in [5.0_f64, 30.0, 60.0, 90.0, 120.0, 150.0, 175.0] {
            let angle = deg.to_radians();
            let to = Vector3::new(angle.sin(), angle.cos(), 0.0);

            let standard = rotation_aligning(from, to);

            let cross = from.cross(&to);
            let algebraic = UnitQuaternion::from_quaternion(Quaternion::new(
                1.0 + from.dot(&to),
                cross.x,
                cross.y,
                cross.z,
            ));

            assert_relative_eq!(
                standard.quaternion().w,
                algebraic.quaternion().w,
                epsilon = 1e-9
            );
            assert_relative_eq!(
                standard.quaternion().i,
                algebraic.quaternion().i,
                epsilon = 1e-9
            );
            assert_relative_eq!(
                standard.quaternion().j,
                algebraic.quaternion().j,
                epsilon = 1e-9
            );
            assert_relative_eq!(
                standard.quaternion().k,
                algebraic.quaternion().k,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_always_unit_norm() {
        let directions = [
            Vector3::x(),
            -Vector3::x(),
            Vector3::y(),
            -Vector3::y(),
            Vector3::z(),
            -Vector3::z(),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-0.3, 0.7, -0.2),
            Vector3::zeros(),
        ];
        for from in directions {
            for to in directions {
                let q = rotation_aligning(from, to);
                assert_relative_eq!(quat_norm(&q), 1.0, epsilon = 1e-9);
            }
        }
    }
}
