//! Affine transform helpers.
//!
//! Matrices are glam [`Mat4`]s (column-major storage). In row/column terms the
//! top-left 3x3 block is rotation/scale, the last column is the translation,
//! and the last row is `[0, 0, 0, 1]`.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::gizmo::Axis;

/// Returns `matrix` with `delta` added to the translation component of `axis`.
#[must_use]
pub fn translate_along_axis(matrix: Mat4, axis: Axis, delta: f32) -> Mat4 {
    let mut out = matrix;
    match axis {
        Axis::X => out.w_axis.x += delta,
        Axis::Y => out.w_axis.y += delta,
        Axis::Z => out.w_axis.z += delta,
    }
    out
}

/// Rotation by `degrees` about `axis` through the pivot `origin`.
///
/// Equivalent to translating by `-origin`, rotating, and translating back.
#[must_use]
pub fn rotation_about_point(origin: Vec3, axis: Axis, degrees: f32) -> Mat4 {
    let radians = degrees.to_radians();
    let rotation = match axis {
        Axis::X => Mat4::from_rotation_x(radians),
        Axis::Y => Mat4::from_rotation_y(radians),
        Axis::Z => Mat4::from_rotation_z(radians),
    };
    Mat4::from_translation(origin) * rotation * Mat4::from_translation(-origin)
}

/// Returns the matrix as row-major nested arrays (`rows[r][c]`).
#[must_use]
pub fn to_rows(matrix: &Mat4) -> [[f32; 4]; 4] {
    matrix.transpose().to_cols_array_2d()
}

/// A transformation represented as separate components.
///
/// Useful for inspecting a committed widget matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation component.
    pub translation: Vec3,
    /// Rotation component as a quaternion.
    pub rotation: Quat,
    /// Scale component.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Decomposes a matrix. Not exact for matrices with shear.
    #[must_use]
    pub fn from_matrix(matrix: Mat4) -> Self {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Converts this transform to a matrix.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Returns the rotation as XYZ Euler angles in degrees.
    #[must_use]
    pub fn euler_angles_degrees(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
    }
}
