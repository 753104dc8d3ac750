//! Contracts between widgets and the host application.
//!
//! A widget never reaches into the host's object graph. It talks to the host
//! through these narrow traits: a [`Renderer`] for meshes and render passes,
//! a [`Picker`] for screen-space hit tests, a [`CoordinateTransform`] for
//! unprojection, an [`EventSource`] for mouse observers, and a
//! [`TargetObject`] carrying the matrix being manipulated.
//!
//! Everything runs on the host's event loop thread, so shared collaborators
//! are passed around as `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3};

use crate::error::Result;
use crate::mesh::TriangleMesh;

/// Handle to a mesh registered with a [`Renderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u64);

/// Handle to an observer registered with an [`EventSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u64);

/// How a mesh should be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStyle {
    /// Material color.
    pub color: Vec3,
    /// Whether lighting is applied.
    pub lighting: bool,
    /// Whether line-like geometry should be drawn as tubes.
    pub render_lines_as_tubes: bool,
    /// Bias depth ordering so the mesh is drawn in front of the scene.
    pub always_on_top: bool,
}

impl MeshStyle {
    /// An unlit mesh of the given color.
    #[must_use]
    pub fn unlit(color: Vec3) -> Self {
        Self {
            color,
            lighting: false,
            render_lines_as_tubes: false,
            always_on_top: false,
        }
    }
}

/// Global mouse interaction mode of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Mouse drags manipulate the camera.
    #[default]
    Camera,
    /// Mouse drags are owned by a widget; camera manipulation is suppressed.
    Widget,
}

/// The kind of a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// The pointer moved.
    Move,
    /// The left button was pressed.
    LeftPress,
    /// The left button was released.
    LeftRelease,
}

impl MouseEventKind {
    /// All event kinds a widget can observe.
    pub const ALL: [MouseEventKind; 3] = [Self::Move, Self::LeftPress, Self::LeftRelease];
}

/// A mouse event in screen pixels (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseEventKind,
    /// Pointer position at the time of the event.
    pub position: Vec2,
}

impl MouseEvent {
    /// Creates a move event.
    #[must_use]
    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            kind: MouseEventKind::Move,
            position: Vec2::new(x, y),
        }
    }

    /// Creates a left-button press event.
    #[must_use]
    pub fn pressed(x: f32, y: f32) -> Self {
        Self {
            kind: MouseEventKind::LeftPress,
            position: Vec2::new(x, y),
        }
    }

    /// Creates a left-button release event.
    #[must_use]
    pub fn released(x: f32, y: f32) -> Self {
        Self {
            kind: MouseEventKind::LeftRelease,
            position: Vec2::new(x, y),
        }
    }
}

/// A mouse observer callback.
pub type Observer = Rc<RefCell<dyn FnMut(&MouseEvent)>>;

/// Mesh registration and render triggering.
pub trait Renderer {
    /// Registers a mesh and returns its handle.
    fn add_mesh(&mut self, mesh: TriangleMesh, style: MeshStyle) -> MeshId;

    /// Detaches and frees a mesh. Returns `false` if it was not registered.
    fn remove_mesh(&mut self, id: MeshId) -> bool;

    /// Changes the material color of a mesh.
    fn set_mesh_color(&mut self, id: MeshId, color: Vec3) -> Result<()>;

    /// Sets the user transform applied to a mesh on top of its vertex data.
    fn set_mesh_transform(&mut self, id: MeshId, transform: Mat4) -> Result<()>;

    /// Issues a render pass.
    fn render(&mut self);

    /// Switches the global mouse interaction mode.
    fn set_interaction_mode(&mut self, mode: InteractionMode);
}

/// Screen-space picking.
pub trait Picker {
    /// Whether the host can pick meshes at a screen position on mouse move.
    fn hardware_picking_available(&self) -> bool;

    /// Whether a picker is currently active.
    fn is_picking_enabled(&self) -> bool;

    /// Activates picking.
    fn enable_picking(&mut self);

    /// Deactivates picking.
    fn disable_picking(&mut self);

    /// Returns the topmost mesh under a screen position.
    fn pick(&mut self, position: Vec2) -> Option<MeshId>;
}

/// Conversion from screen positions to world points.
pub trait CoordinateTransform {
    /// Physically accurate world point on the pixel ray under `position`.
    ///
    /// Depends on the camera position, so angles measured from it match
    /// what the user sees.
    fn display_to_world(&self, position: Vec2) -> Option<Vec3>;

    /// Camera-matrix based world point under `position`, without the
    /// perspective divide.
    ///
    /// Not a physical point, but insensitive to zoom, which keeps
    /// translation drags at a constant speed.
    fn projective_to_world(&self, position: Vec2) -> Option<Vec3>;

    /// Unit direction the active camera looks along.
    fn view_direction(&self) -> Vec3;
}

/// Mouse event observers.
pub trait EventSource {
    /// Registers an observer for one event kind.
    fn add_observer(&mut self, kind: MouseEventKind, observer: Observer) -> ObserverId;

    /// Unregisters an observer. Returns `false` if it was not registered.
    fn remove_observer(&mut self, id: ObserverId) -> bool;
}

/// The object a widget manipulates.
pub trait TargetObject {
    /// The committed user matrix, if one was ever set.
    fn user_matrix(&self) -> Option<Mat4>;

    /// Replaces the user matrix.
    fn set_user_matrix(&mut self, matrix: Mat4);

    /// Characteristic length (bounding-box diagonal) used to size widgets.
    fn length(&self) -> f32;

    /// Center of the object's bounding box.
    fn center(&self) -> Vec3;
}

/// Everything a widget needs from the host viewport.
pub trait Interactor: Renderer + Picker + CoordinateTransform + EventSource {}

impl<T: Renderer + Picker + CoordinateTransform + EventSource + ?Sized> Interactor for T {}
