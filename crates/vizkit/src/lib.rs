//! vizkit: interactive 3D widgets.
//!
//! The main entry point is [`AffineWidget`], a gizmo with three translation
//! arrows and three rotation rings that lets the user drag-transform an object.
//! It talks to its host through the collaborator traits re-exported here
//! ([`Renderer`], [`Picker`], [`CoordinateTransform`], [`EventSource`] and
//! [`TargetObject`]); [`HeadlessViewport`] and [`Actor`] implement them
//! without a window.
//!
//! # Quick Start
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use vizkit::mesh::cube;
//! use vizkit::*;
//!
//! fn main() -> Result<()> {
//!     let viewport = HeadlessViewport::new(800, 600).into_shared();
//!     let actor = Rc::new(RefCell::new(Actor::new("box", cube(Vec3::ZERO, 1.0))));
//!
//!     let config = AffineWidgetConfig::default().with_scale(0.2);
//!     let widget = AffineWidget::new(
//!         &viewport,
//!         &actor,
//!         config,
//!         Some(Box::new(|matrix: Mat4| {
//!             println!("committed {matrix}");
//!             Ok(())
//!         })),
//!     )?;
//!
//!     // Feed mouse events from the host event loop.
//!     HeadlessViewport::dispatch(&viewport, &MouseEvent::moved(400.0, 300.0));
//!     assert!(!widget.is_dragging());
//!     Ok(())
//! }
//! ```

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Accessors returning simple values don't need must_use
#![allow(clippy::must_use_candidate)]

mod affine_widget;

pub use affine_widget::{AffineWidget, CallbackResult, Handle, ReleaseCallback};

// Re-export core types
pub use vizkit_core::{
    color, geometry, gizmo, mesh, transform, AffineWidgetConfig, Axis, AxisColors,
    CoordinateTransform, EventSource, HandleKind, InteractionMode, Interactor, MeshId, MeshStyle,
    MouseEvent, MouseEventKind, Observer, ObserverId, Picker, Renderer, Result, TargetObject,
    Transform, TriangleMesh, VizkitError, DARK_YELLOW,
};

// Re-export the headless host
pub use vizkit_render::{Actor, Camera, HeadlessViewport, ProjectionMode};

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
