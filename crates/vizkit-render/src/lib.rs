//! Headless host for vizkit.
//!
//! Widgets only see the collaborator traits from `vizkit-core`. This crate
//! implements them without a window: a [`Camera`] for projections, CPU ray
//! picking, a mesh registry and mouse event dispatch in
//! [`HeadlessViewport`], and [`Actor`] as a manipulable scene object.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Accessors returning simple values don't need must_use
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod camera;
pub mod pick;
pub mod viewport;

pub use actor::Actor;
pub use camera::{Camera, ProjectionMode};
pub use pick::{ray_intersect_mesh, ray_intersect_triangle};
pub use viewport::HeadlessViewport;
