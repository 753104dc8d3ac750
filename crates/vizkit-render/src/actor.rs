//! Scene actors that widgets can manipulate.

use glam::{Mat4, Vec3};
use vizkit_core::{TargetObject, TriangleMesh};

/// A mesh with a user matrix applied on top of its vertex data.
///
/// The user matrix is not baked into the vertices; it is left unset until
/// something assigns it.
#[derive(Debug, Clone)]
pub struct Actor {
    name: String,
    mesh: TriangleMesh,
    user_matrix: Option<Mat4>,
}

impl Actor {
    /// Creates an actor without a user matrix.
    pub fn new(name: impl Into<String>, mesh: TriangleMesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            user_matrix: None,
        }
    }

    /// Returns the actor name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the untransformed mesh.
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Returns the mesh with the user matrix applied.
    pub fn transformed_mesh(&self) -> TriangleMesh {
        let mut mesh = self.mesh.clone();
        if let Some(matrix) = self.user_matrix {
            mesh.transform(&matrix);
        }
        mesh
    }
}

impl TargetObject for Actor {
    fn user_matrix(&self) -> Option<Mat4> {
        self.user_matrix
    }

    fn set_user_matrix(&mut self, matrix: Mat4) {
        self.user_matrix = Some(matrix);
    }

    fn length(&self) -> f32 {
        self.mesh.length()
    }

    fn center(&self) -> Vec3 {
        self.mesh.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vizkit_core::mesh::cube;

    #[test]
    fn test_actor_extents() {
        let actor = Actor::new("box", cube(Vec3::new(1.0, 0.0, 0.0), 2.0));
        assert_eq!(actor.name(), "box");
        assert_eq!(actor.center(), Vec3::new(1.0, 0.0, 0.0));
        assert!((actor.length() - 12f32.sqrt()).abs() < 1e-5);
        assert!(actor.user_matrix().is_none());
    }

    #[test]
    fn test_user_matrix_not_baked() {
        let mut actor = Actor::new("box", cube(Vec3::ZERO, 1.0));
        actor.set_user_matrix(Mat4::from_translation(Vec3::X));
        assert_eq!(actor.mesh().center(), Vec3::ZERO);
        assert!((actor.transformed_mesh().center() - Vec3::X).length() < 1e-6);
    }
}
