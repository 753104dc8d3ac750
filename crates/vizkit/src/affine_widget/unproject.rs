//! Screen-to-world conversions used by drags.
//!
//! Translation and rotation drags deliberately use different conversions.
//! Swapping one for the other changes how a drag feels: translation would
//! speed up and slow down with zoom, and rotation angles would drift away
//! from what is under the cursor.

use glam::{Vec2, Vec3};
use vizkit_core::{ray_plane_intersection, CoordinateTransform, HandleKind};

/// How a screen position becomes a world point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unprojection {
    /// Camera-matrix point without perspective divide, scaled by the target
    /// length. Zoom independent, not physically accurate.
    Projective,
    /// Display-coordinate point on the pixel ray. Physically accurate,
    /// depends on the camera position.
    Display,
}

/// The plane a handle's drag is measured in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DragPlane {
    pub unprojection: Unprojection,
    pub normal: Vec3,
}

impl DragPlane {
    /// Arrows drag in the plane of the next axis in cyclic order, rings in
    /// the plane perpendicular to their own axis.
    pub(crate) fn for_handle(kind: HandleKind) -> Self {
        match kind {
            HandleKind::Translation(axis) => Self {
                unprojection: Unprojection::Projective,
                normal: axis.next().unit(),
            },
            HandleKind::Rotation(axis) => Self {
                unprojection: Unprojection::Display,
                normal: axis.unit(),
            },
        }
    }

    /// Converts a screen position and projects it along the view direction
    /// onto the plane through `origin`.
    ///
    /// Returns `None` when the host cannot unproject the position or the view
    /// direction is parallel to the plane.
    pub(crate) fn world_point<H>(
        &self,
        host: &H,
        position: Vec2,
        origin: Vec3,
        target_length: f32,
    ) -> Option<Vec3>
    where
        H: CoordinateTransform + ?Sized,
    {
        let point = match self.unprojection {
            Unprojection::Projective => host.projective_to_world(position)? * target_length,
            Unprojection::Display => host.display_to_world(position)?,
        };
        ray_plane_intersection(point, host.view_direction(), origin, self.normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vizkit_core::Axis;

    /// Orthographic view straight down -Z with unit pixels.
    struct TopDown;

    impl CoordinateTransform for TopDown {
        fn display_to_world(&self, position: Vec2) -> Option<Vec3> {
            Some(Vec3::new(position.x, -position.y, 10.0))
        }

        fn projective_to_world(&self, position: Vec2) -> Option<Vec3> {
            Some(Vec3::new(position.x, -position.y, 1.0) * 0.01)
        }

        fn view_direction(&self) -> Vec3 {
            Vec3::new(0.0, 0.0, -1.0)
        }
    }

    #[test]
    fn test_handle_planes() {
        let plane = DragPlane::for_handle(HandleKind::Translation(Axis::Z));
        assert_eq!(plane.unprojection, Unprojection::Projective);
        assert_eq!(plane.normal, Vec3::X);

        let plane = DragPlane::for_handle(HandleKind::Rotation(Axis::Y));
        assert_eq!(plane.unprojection, Unprojection::Display);
        assert_eq!(plane.normal, Vec3::Y);
    }

    #[test]
    fn test_display_point_lands_on_plane() {
        let plane = DragPlane::for_handle(HandleKind::Rotation(Axis::Z));
        let origin = Vec3::new(0.0, 0.0, 2.0);
        let point = plane
            .world_point(&TopDown, Vec2::new(3.0, -4.0), origin, 1.0)
            .unwrap();
        assert!((point - Vec3::new(3.0, 4.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_projective_point_scales_with_length() {
        let plane = DragPlane {
            unprojection: Unprojection::Projective,
            normal: Vec3::Z,
        };
        let point = plane
            .world_point(&TopDown, Vec2::new(100.0, 0.0), Vec3::ZERO, 5.0)
            .unwrap();
        assert!((point - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_parallel_view_has_no_point() {
        // Looking down -Z, a plane with normal X contains the view direction.
        let plane = DragPlane::for_handle(HandleKind::Translation(Axis::Z));
        assert!(plane
            .world_point(&TopDown, Vec2::ZERO, Vec3::ZERO, 1.0)
            .is_none());
    }
}
