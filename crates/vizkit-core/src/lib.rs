//! Core abstractions for vizkit.
//!
//! This crate provides the pieces interactive widgets are built from:
//! - Geometry utilities (angles, ray/plane intersection)
//! - Gizmo axis and handle types, widget configuration, colors
//! - Triangle mesh primitives (arrows, arcs, tubes)
//! - The collaborator traits a host viewport implements

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod color;
pub mod error;
pub mod geometry;
pub mod gizmo;
pub mod interactor;
pub mod mesh;
pub mod transform;

pub use color::{parse_color, DARK_YELLOW};
pub use error::{Result, VizkitError};
pub use geometry::{angle_between_degrees, project_onto_plane, ray_plane_intersection};
pub use gizmo::{AffineWidgetConfig, Axis, AxisColors, HandleKind};
pub use interactor::{
    CoordinateTransform, EventSource, InteractionMode, Interactor, MeshId, MeshStyle, MouseEvent,
    MouseEventKind, Observer, ObserverId, Picker, Renderer, TargetObject,
};
pub use mesh::TriangleMesh;
pub use transform::Transform;

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
