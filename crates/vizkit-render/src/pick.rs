//! CPU ray picking against triangle meshes.

use glam::{Mat4, Vec3};
use vizkit_core::TriangleMesh;

/// Intersects a ray with a triangle (Möller–Trumbore, two-sided).
///
/// Returns the ray parameter `t` of the hit, which is strictly positive.
#[must_use]
pub fn ray_intersect_triangle(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<f32> {
    let eps = 1e-9;
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray_dir.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < eps {
        return None;
    }
    let f = 1.0 / a;
    let s = ray_origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = f * ray_dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = f * edge2.dot(q);
    (t > 1e-6).then_some(t)
}

/// Returns the closest hit of a ray with a mesh placed by `transform`.
#[must_use]
pub fn ray_intersect_mesh(
    ray_origin: Vec3,
    ray_dir: Vec3,
    mesh: &TriangleMesh,
    transform: &Mat4,
) -> Option<f32> {
    mesh.triangle_vertices()
        .filter_map(|[a, b, c]| {
            ray_intersect_triangle(
                ray_origin,
                ray_dir,
                transform.transform_point3(a),
                transform.transform_point3(b),
                transform.transform_point3(c),
            )
        })
        .min_by(f32::total_cmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::UVec3;
    use proptest::prelude::*;

    fn unit_triangle() -> TriangleMesh {
        TriangleMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![UVec3::new(0, 1, 2)],
        )
    }

    #[test]
    fn test_triangle_hit_and_miss() {
        let origin = Vec3::new(0.25, 0.25, 2.0);
        let t = ray_intersect_triangle(origin, Vec3::NEG_Z, Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!((t.unwrap() - 2.0).abs() < 1e-6);

        // Behind the ray origin.
        assert!(ray_intersect_triangle(origin, Vec3::Z, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
        // Outside the triangle.
        let outside = Vec3::new(0.8, 0.8, 2.0);
        assert!(ray_intersect_triangle(outside, Vec3::NEG_Z, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
        // Parallel.
        assert!(ray_intersect_triangle(origin, Vec3::X, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    }

    #[test]
    fn test_mesh_transform_is_applied() {
        let mesh = unit_triangle();
        let origin = Vec3::new(0.25, 0.25, 2.0);
        let moved = Mat4::from_translation(Vec3::new(0.0, 0.0, 1.0));
        let t = ray_intersect_mesh(origin, Vec3::NEG_Z, &mesh, &moved).unwrap();
        assert!((t - 1.0).abs() < 1e-6);

        let away = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
        assert!(ray_intersect_mesh(origin, Vec3::NEG_Z, &mesh, &away).is_none());
    }

    proptest! {
        #[test]
        fn prop_interior_points_are_hit(
            u in 0.01f32..0.98,
            w in 0.01f32..0.98,
            height in 0.1f32..10.0,
        ) {
            let v = w * (0.99 - u);
            let (v0, v1, v2) = (
                Vec3::new(-1.0, 0.0, 0.5),
                Vec3::new(2.0, 0.5, -0.5),
                Vec3::new(0.0, 3.0, 1.0),
            );
            let inside = v0 + u * (v1 - v0) + v * (v2 - v0);
            let normal = (v1 - v0).cross(v2 - v0).normalize();
            let origin = inside + normal * height;
            let t = ray_intersect_triangle(origin, -normal, v0, v1, v2);
            prop_assert!(t.is_some());
            prop_assert!((t.unwrap() - height).abs() < 1e-3 * height.max(1.0));
        }
    }
}
