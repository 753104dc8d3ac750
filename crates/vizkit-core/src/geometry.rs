//! Geometry utilities used by the interactive widgets.
//!
//! These are pure functions with no state. Degenerate inputs (zero-length
//! vectors, rays parallel to a plane) produce `None` rather than `NaN` or
//! infinite values so callers can skip a single event and carry on.

use glam::Vec3;

/// Relative tolerance below which a ray is considered parallel to a plane.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Returns the angle between two vectors in degrees, in `[0, 180]`.
///
/// The inputs need not be normalized. This is `acos(dot(v1, v2))` of the
/// normalized vectors, evaluated as `atan2(|v1 x v2|, v1 . v2)` which stays
/// exact at 0 and 180 degrees where `acos` loses precision.
///
/// Returns `None` if either vector has zero (or non-finite) length.
#[must_use]
pub fn angle_between_degrees(v1: Vec3, v2: Vec3) -> Option<f32> {
    let a = v1.try_normalize()?;
    let b = v2.try_normalize()?;
    let cos = a.dot(b).clamp(-1.0, 1.0);
    let sin = a.cross(b).length();
    Some(sin.atan2(cos).to_degrees())
}

/// Intersects the ray `ray_origin + t * ray_dir` with the plane through
/// `plane_point` with normal `plane_normal`.
///
/// `t` is not restricted to be positive: the ray is treated as a full line.
/// Returns `None` when the ray is (nearly) parallel to the plane or when either
/// direction has zero length.
#[must_use]
pub fn ray_plane_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<Vec3> {
    let denom = plane_normal.dot(ray_dir);
    let scale = plane_normal.length() * ray_dir.length();
    if !scale.is_normal() || denom.abs() <= PARALLEL_EPSILON * scale {
        return None;
    }

    let t = plane_normal.dot(plane_point - ray_origin) / denom;
    let hit = ray_origin + ray_dir * t;
    hit.is_finite().then_some(hit)
}

/// Removes the component of `v` along the unit vector `normal`.
#[must_use]
pub fn project_onto_plane(v: Vec3, normal: Vec3) -> Vec3 {
    v - v.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_angle_known_values() {
        let v = Vec3::new(0.3, -2.0, 5.0);
        assert_eq!(angle_between_degrees(v, v), Some(0.0));
        assert_eq!(angle_between_degrees(v, -v), Some(180.0));

        let right = angle_between_degrees(Vec3::X, Vec3::Y).unwrap();
        assert!((right - 90.0).abs() < 1e-5);

        let diag = angle_between_degrees(Vec3::X, Vec3::new(1.0, 1.0, 0.0)).unwrap();
        assert!((diag - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_angle_ignores_magnitude() {
        let a = angle_between_degrees(Vec3::X * 10.0, Vec3::new(0.0, 0.001, 0.0)).unwrap();
        assert!((a - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_angle_zero_vector() {
        assert!(angle_between_degrees(Vec3::ZERO, Vec3::X).is_none());
        assert!(angle_between_degrees(Vec3::X, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_ray_plane_basic() {
        let hit = ray_plane_intersection(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert_eq!(hit, Some(Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_ray_plane_behind_origin() {
        // The ray is a full line, so hits behind the origin are reported.
        let hit = ray_plane_intersection(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -2.0), Vec3::Z)
            .unwrap();
        assert!((hit - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-6);
    }

    #[test]
    fn test_ray_plane_parallel() {
        assert!(ray_plane_intersection(Vec3::ZERO, Vec3::X, Vec3::Z, Vec3::Z).is_none());
        assert!(ray_plane_intersection(Vec3::ZERO, Vec3::ZERO, Vec3::Z, Vec3::Z).is_none());
    }

    #[test]
    fn test_project_onto_plane() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(project_onto_plane(v, Vec3::Z), Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(project_onto_plane(v, Vec3::X), Vec3::new(0.0, 2.0, 3.0));
    }

    fn vec3_strategy() -> impl Strategy<Value = Vec3> {
        (-10.0f32..10.0, -10.0f32..10.0, -10.0f32..10.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn prop_angle_in_range_and_symmetric(a in vec3_strategy(), b in vec3_strategy()) {
            prop_assume!(a.length() > 1e-3 && b.length() > 1e-3);
            let ab = angle_between_degrees(a, b).unwrap();
            let ba = angle_between_degrees(b, a).unwrap();
            prop_assert!((0.0..=180.0).contains(&ab));
            prop_assert!((ab - ba).abs() < 1e-3);
        }

        #[test]
        fn prop_intersection_lies_on_plane(
            origin in vec3_strategy(),
            dir in vec3_strategy(),
            point in vec3_strategy(),
            normal in vec3_strategy(),
        ) {
            prop_assume!(normal.length() > 1e-2 && dir.length() > 1e-2);
            prop_assume!(normal.normalize().dot(dir.normalize()).abs() > 0.1);
            let hit = ray_plane_intersection(origin, dir, point, normal).unwrap();
            let distance = (hit - point).dot(normal.normalize());
            prop_assert!(distance.abs() < 1e-2);
        }
    }
}
