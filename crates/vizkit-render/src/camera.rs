//! Camera and screen/world conversions.
//!
//! Screen positions are in pixels with the origin at the top-left corner and
//! y pointing down. NDC depth follows the `[0, 1]` convention.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Camera projection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    /// Perspective projection.
    #[default]
    Perspective,
    /// Orthographic projection.
    Orthographic,
}

/// A 3D camera for viewing the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at (the focal point).
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Projection mode.
    pub projection_mode: ProjectionMode,
    /// Orthographic scale (used when `projection_mode` is Orthographic).
    pub ortho_scale: f32,
}

impl Camera {
    /// Creates a new camera with default settings.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: std::f32::consts::FRAC_PI_4, // 45 degrees
            aspect_ratio,
            near: 0.01,
            far: 1000.0,
            projection_mode: ProjectionMode::Perspective,
            ortho_scale: 1.0,
        }
    }

    /// Sets the aspect ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection_mode {
            ProjectionMode::Perspective => {
                Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let half_height = self.ortho_scale;
                let half_width = half_height * self.aspect_ratio;
                // Symmetric depth range around the camera so geometry between
                // the camera and the focal point is never clipped.
                let dist = (self.position - self.target).length();
                let ortho_depth = (dist + self.far).max(self.ortho_scale * 100.0);
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    -ortho_depth,
                    ortho_depth,
                )
            }
        }
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Returns the camera's forward direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Zooms the camera (moves toward/away from target for perspective,
    /// adjusts `ortho_scale` for orthographic).
    pub fn zoom(&mut self, delta: f32) {
        match self.projection_mode {
            ProjectionMode::Perspective => {
                let direction = self.forward();
                let distance = (self.position - self.target).length();
                let new_distance = (distance - delta).max(0.1);
                self.position = self.target - direction * new_distance;
            }
            ProjectionMode::Orthographic => {
                let zoom_factor = 1.0 - delta * 0.4;
                self.ortho_scale = (self.ortho_scale * zoom_factor).clamp(0.01, 1000.0);
            }
        }
    }

    /// Looks at the given bounding box from the `(1, 1, 1)` diagonal.
    ///
    /// From this isometric direction no coordinate axis is parallel or
    /// perpendicular to the view, so every axis-aligned drag plane is usable.
    pub fn look_at_box_isometric(&mut self, min: Vec3, max: Vec3) {
        let center = (min + max) * 0.5;
        let size = (max - min).length().max(1e-3);

        self.target = center;
        self.position = center + Vec3::ONE.normalize() * size * 1.5;
        self.up = Vec3::Y;
        self.near = size * 0.001;
        self.far = size * 100.0;
        self.ortho_scale = size * 0.6;
    }

    /// Sets the projection mode.
    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.projection_mode = mode;
    }

    /// Converts a screen position to normalized device x/y.
    #[must_use]
    pub fn screen_to_ndc(position: Vec2, screen_size: Vec2) -> Option<Vec2> {
        if screen_size.x <= 0.0 || screen_size.y <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            2.0 * position.x / screen_size.x - 1.0,
            1.0 - 2.0 * position.y / screen_size.y,
        ))
    }

    /// Projects a world point to a screen position.
    ///
    /// Returns `None` for points behind a perspective camera.
    #[must_use]
    pub fn world_to_screen(&self, point: Vec3, screen_size: Vec2) -> Option<Vec2> {
        let clip = self.view_projection_matrix() * point.extend(1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * screen_size.x,
            (1.0 - ndc.y) * 0.5 * screen_size.y,
        ))
    }

    /// Unprojects a screen position at the given NDC depth.
    fn unproject(&self, position: Vec2, screen_size: Vec2, depth: f32) -> Option<Vec3> {
        let ndc = Self::screen_to_ndc(position, screen_size)?;
        let p = self.view_projection_matrix().inverse() * Vec4::new(ndc.x, ndc.y, depth, 1.0);
        if p.w.abs() < 1e-12 {
            return None;
        }
        let world = p.truncate() / p.w;
        world.is_finite().then_some(world)
    }

    /// Returns the pick ray `(origin, direction)` through a screen position.
    #[must_use]
    pub fn screen_ray(&self, position: Vec2, screen_size: Vec2) -> Option<(Vec3, Vec3)> {
        let ray_origin = self.unproject(position, screen_size, 0.0)?;
        let ray_far = self.unproject(position, screen_size, 1.0)?;
        let ray_dir = (ray_far - ray_origin).try_normalize()?;
        Some((ray_origin, ray_dir))
    }

    /// World point under a screen position at the depth of the focal point.
    ///
    /// The point lies exactly on the pixel's view ray.
    #[must_use]
    pub fn display_to_world(&self, position: Vec2, screen_size: Vec2) -> Option<Vec3> {
        let focal_depth = self.view_projection_matrix().project_point3(self.target).z;
        self.unproject(position, screen_size, focal_depth)
    }

    /// Camera-matrix based point for a screen position, without the
    /// perspective divide.
    ///
    /// The screen position is taken at the far plane, mapped through the
    /// inverse projection and inverse view, and the homogeneous `w` is
    /// dropped. For a perspective camera the result is essentially the view
    /// ray direction (plus a tiny camera-position term), so differences
    /// between two screen positions do not change when the camera zooms.
    #[must_use]
    pub fn projective_to_world(&self, position: Vec2, screen_size: Vec2) -> Option<Vec3> {
        let ndc = Self::screen_to_ndc(position, screen_size)?;
        let camera_coords = self.projection_matrix().inverse() * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let world = self.view_matrix().inverse() * camera_coords;
        let point = world.truncate();
        point.is_finite().then_some(point)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Vec2 = Vec2::new(400.0, 300.0);

    fn iso_camera() -> Camera {
        let mut camera = Camera::new(SCREEN.x / SCREEN.y);
        camera.look_at_box_isometric(Vec3::splat(-0.5), Vec3::splat(0.5));
        camera
    }

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::default();
        assert_eq!(camera.projection_mode, ProjectionMode::Perspective);
        assert_eq!(camera.up, Vec3::Y);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = iso_camera();
        let center = camera.world_to_screen(Vec3::ZERO, SCREEN).unwrap();
        assert!((center - SCREEN * 0.5).length() < 1e-3);
    }

    #[test]
    fn test_screen_ray_passes_through_point() {
        let camera = iso_camera();
        let point = Vec3::new(0.2, -0.1, 0.3);
        let screen = camera.world_to_screen(point, SCREEN).unwrap();
        let (origin, dir) = camera.screen_ray(screen, SCREEN).unwrap();
        let to_point = point - origin;
        let off_ray = to_point - to_point.dot(dir) * dir;
        assert!(off_ray.length() < 1e-3);
    }

    #[test]
    fn test_display_to_world_on_pixel_ray() {
        for mode in [ProjectionMode::Perspective, ProjectionMode::Orthographic] {
            let mut camera = iso_camera();
            camera.set_projection_mode(mode);
            let screen = Vec2::new(120.0, 80.0);
            let world = camera.display_to_world(screen, SCREEN).unwrap();
            let back = camera.world_to_screen(world, SCREEN).unwrap();
            assert!((back - screen).length() < 1e-2, "{mode:?}");
            // Lies on the plane through the focal point facing the camera.
            assert!((world - camera.target).dot(camera.forward()).abs() < 5e-3);
        }
    }

    #[test]
    fn test_display_to_world_orthographic_is_exact() {
        let mut camera = iso_camera();
        camera.set_projection_mode(ProjectionMode::Orthographic);
        let point = Vec3::new(0.3, 0.1, 0.0);
        let screen = camera.world_to_screen(point, SCREEN).unwrap();
        let world = camera.display_to_world(screen, SCREEN).unwrap();
        let off = (world - point) - (world - point).dot(camera.forward()) * camera.forward();
        assert!(off.length() < 1e-4);
    }

    #[test]
    fn test_projective_delta_is_zoom_independent() {
        let mut camera = iso_camera();
        let a = Vec2::new(200.0, 150.0);
        let b = Vec2::new(260.0, 130.0);
        let before = camera.projective_to_world(b, SCREEN).unwrap()
            - camera.projective_to_world(a, SCREEN).unwrap();
        camera.zoom(1.0);
        let after = camera.projective_to_world(b, SCREEN).unwrap()
            - camera.projective_to_world(a, SCREEN).unwrap();
        assert!((before - after).length() < 1e-4 * before.length().max(1.0));
        assert!(before.length() > 1e-3);
    }

    #[test]
    fn test_zero_screen_size() {
        let camera = iso_camera();
        assert!(camera.screen_ray(Vec2::ZERO, Vec2::ZERO).is_none());
        assert!(camera.display_to_world(Vec2::ZERO, Vec2::ZERO).is_none());
        assert!(camera.projective_to_world(Vec2::ZERO, Vec2::ZERO).is_none());
    }
}
