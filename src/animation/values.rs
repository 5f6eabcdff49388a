use glam::{Quat, Vec3};

/// A value type a [`KeyframeTrack`](crate::animation::KeyframeTrack) can
/// interpolate between.
///
/// Scalars and vectors blend linearly; quaternions blend spherically so the
/// angular velocity stays constant across the segment.
pub trait Interpolatable: Copy {
    /// Blend from `a` toward `b` by fraction `t`.
    fn interpolate_linear(a: Self, b: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(a: Self, b: Self, t: f32) -> Self {
        a + (b - a) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(a: Self, b: Self, t: f32) -> Self {
        a.lerp(b, t)
    }
}

impl Interpolatable for Quat {
    fn interpolate_linear(a: Self, b: Self, t: f32) -> Self {
        slerp(a, b, t)
    }
}

/// Normalizes a quaternion, returning degenerate (zero-norm) input unchanged
/// instead of propagating NaNs.
#[must_use]
pub fn normalize_or_self(q: Quat) -> Quat {
    let norm = q.length();
    if norm > 0.0 { q * (1.0 / norm) } else { q }
}

/// Spherical linear interpolation between two unit quaternions.
///
/// When the dot product is negative the second quaternion is negated so the
/// blend takes the shorter rotational path. The result is built from `q0`
/// and the component of `q1` orthonormal to it, so it stays unit-norm within
/// floating-point tolerance; a near-zero angle degenerates gracefully since
/// the orthonormal component then contributes nothing.
#[must_use]
pub fn slerp(q0: Quat, q1: Quat, fraction: f32) -> Quat {
    // Only unit quaternions are valid rotations.
    let q0 = normalize_or_self(q0);
    let mut q1 = normalize_or_self(q1);

    let mut dot = q0.dot(q1);
    if dot < 0.0 {
        q1 = -q1;
        dot = -dot;
    }

    let theta_0 = dot.clamp(-1.0, 1.0).acos(); // angle between the inputs
    let theta = theta_0 * fraction; // angle between q0 and the result
    let q2 = normalize_or_self(q1 - q0 * dot); // {q0, q2} orthonormal basis

    q0 * theta.cos() + q2 * theta.sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn slerp_endpoints() {
        let q0 = Quat::from_rotation_y(0.3);
        let q1 = Quat::from_rotation_y(1.1);

        assert!(slerp(q0, q1, 0.0).abs_diff_eq(q0, EPSILON));
        // The endpoint must be rotationally equivalent to q1 (sign may flip).
        assert!(slerp(q0, q1, 1.0).dot(q1).abs() > 1.0 - EPSILON);
    }

    #[test]
    fn slerp_takes_shorter_path() {
        let q0 = Quat::from_rotation_z(0.1);
        // Same rotation as q1 but with opposite handedness.
        let q1 = -Quat::from_rotation_z(0.4);

        let mid = slerp(q0, q1, 0.5);
        let expected = Quat::from_rotation_z(0.25);
        assert!(mid.dot(expected).abs() > 1.0 - EPSILON);
    }

    #[test]
    fn slerp_stays_unit_norm() {
        let q0 = Quat::from_euler(glam::EulerRot::XYZ, 0.4, -1.2, 2.8);
        let q1 = Quat::from_euler(glam::EulerRot::XYZ, -2.0, 0.7, FRAC_PI_2);

        for i in 0..=10 {
            let q = slerp(q0, q1, i as f32 / 10.0);
            assert!((q.length() - 1.0).abs() < EPSILON, "norm drift at {i}");
        }
    }

    #[test]
    fn normalize_or_self_keeps_zero_input() {
        let zero = Quat::from_xyzw(0.0, 0.0, 0.0, 0.0);
        let out = normalize_or_self(zero);
        assert_eq!(out, zero);
        assert!(!out.x.is_nan());
    }
}
