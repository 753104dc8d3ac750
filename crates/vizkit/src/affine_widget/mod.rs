//! Interactive affine transform widget.
//!
//! The widget draws three translation arrows and three quarter rotation rings
//! around an origin. Hovering a handle highlights it; dragging it translates
//! the target along the handle's axis or rotates it about the axis through
//! the origin. The target's user matrix is updated live during the drag and
//! committed on release, at which point the optional callback receives it.
//!
//! # Example
//!
//! ```
//! use vizkit::{AffineWidget, AffineWidgetConfig, Actor, HeadlessViewport};
//! use vizkit::mesh::cube;
//! use vizkit::Vec3;
//!
//! let viewport = HeadlessViewport::new(640, 480).into_shared();
//! let actor = std::rc::Rc::new(std::cell::RefCell::new(
//!     Actor::new("box", cube(Vec3::ZERO, 1.0)),
//! ));
//! let widget = AffineWidget::new(&viewport, &actor, AffineWidgetConfig::default(), None)?;
//! assert!(widget.is_enabled());
//! assert_eq!(widget.origin(), Vec3::ZERO);
//! # Ok::<(), vizkit::VizkitError>(())
//! ```

mod build;
mod interaction;
mod unproject;

use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use glam::{Mat4, Vec3};
use vizkit_core::{
    AffineWidgetConfig, AxisColors, HandleKind, InteractionMode, Interactor, MeshId, MouseEvent,
    MouseEventKind, Observer, ObserverId, Result, TargetObject, VizkitError,
};

/// Result returned by a release callback.
pub type CallbackResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// Callback invoked with the committed matrix at the end of every drag.
pub type ReleaseCallback = Box<dyn FnMut(Mat4) -> CallbackResult>;

/// A pickable part of the gizmo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle {
    /// What dragging the handle does.
    pub kind: HandleKind,
    /// The handle's mesh in the host renderer.
    pub mesh: MeshId,
}

/// State of a drag, from press to release.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    handle: Handle,
    /// World point under the cursor at press time, in the handle's drag plane.
    init_position: Vec3,
}

/// Observers registered with the host while the widget is enabled.
#[derive(Debug, Clone, Copy)]
struct Subscription {
    on_move: ObserverId,
    on_press: ObserverId,
    on_release: ObserverId,
}

struct WidgetState {
    host: Weak<RefCell<dyn Interactor>>,
    target: Weak<RefCell<dyn TargetObject>>,
    handles: Vec<Handle>,
    axes_colors: AxisColors,
    highlight_color: Vec3,
    target_length: f32,
    /// Origin the handle geometry was built around.
    build_origin: Vec3,
    origin: Vec3,
    cached_matrix: Mat4,
    hovered: Option<Handle>,
    drag: Option<DragSession>,
    subscription: Option<Subscription>,
    owns_picking: bool,
    removed: bool,
    callback: Option<ReleaseCallback>,
}

/// Drag-to-transform gizmo attached to a target object.
///
/// The widget holds weak references to the host and the target; once either
/// is dropped, events are ignored and [`disable`](Self::disable) and
/// [`remove`](Self::remove) become no-ops. Dropping the widget removes it
/// from the host.
pub struct AffineWidget {
    state: Rc<RefCell<WidgetState>>,
}

impl AffineWidget {
    /// Builds the gizmo around `target` and registers it with `host`.
    ///
    /// The origin defaults to the center of the target. If the target has no
    /// user matrix yet it is set to the identity. Unless `config.start` is
    /// `false` the widget is enabled right away.
    ///
    /// Fails with [`VizkitError::InvalidArgument`] for unusable configuration
    /// values or a target without extent, and with
    /// [`VizkitError::PreconditionFailed`] when the host cannot pick. Nothing
    /// is registered with the host when construction fails.
    pub fn new<H, T>(
        host: &Rc<RefCell<H>>,
        target: &Rc<RefCell<T>>,
        config: AffineWidgetConfig,
        callback: Option<ReleaseCallback>,
    ) -> Result<Self>
    where
        H: Interactor + 'static,
        T: TargetObject + 'static,
    {
        config.validate()?;
        if !host.borrow().hardware_picking_available() {
            return Err(VizkitError::PreconditionFailed(
                "the affine widget requires hardware picking support".to_string(),
            ));
        }

        let (target_length, center, cached_matrix) = {
            let mut target = target.borrow_mut();
            let length = target.length();
            if !(length.is_finite() && length > 0.0) {
                return Err(VizkitError::InvalidArgument(format!(
                    "target length must be a positive finite number, got {length}"
                )));
            }
            let matrix = target.user_matrix().unwrap_or_else(|| {
                target.set_user_matrix(Mat4::IDENTITY);
                Mat4::IDENTITY
            });
            (length, target.center(), matrix)
        };
        let origin = config.origin.unwrap_or(center);

        let meshes = build::gizmo_meshes(origin, target_length, &config)?;
        let handles = build::register(&mut *host.borrow_mut(), meshes, &config);

        let host_dyn: Rc<RefCell<dyn Interactor>> = host.clone();
        let target_dyn: Rc<RefCell<dyn TargetObject>> = target.clone();
        let widget = Self {
            state: Rc::new(RefCell::new(WidgetState {
                host: Rc::downgrade(&host_dyn),
                target: Rc::downgrade(&target_dyn),
                handles,
                axes_colors: config.axes_colors,
                highlight_color: config.highlight_color,
                target_length,
                build_origin: origin,
                origin,
                cached_matrix,
                hovered: None,
                drag: None,
                subscription: None,
                owns_picking: false,
                removed: false,
                callback,
            })),
        };
        log::info!("affine widget created at origin {origin}");

        if config.start {
            widget.enable()?;
        }
        Ok(widget)
    }

    /// Starts listening to mouse events.
    ///
    /// Turns picking on unless it is already active. Calling this on an
    /// enabled widget does nothing; calling it on a removed widget does
    /// nothing either.
    pub fn enable(&self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.subscription.is_some() || state.removed {
            return Ok(());
        }
        let host = state.host.upgrade().ok_or(VizkitError::HostUnavailable)?;
        let mut host = host.borrow_mut();

        if !host.is_picking_enabled() {
            host.enable_picking();
            state.owns_picking = true;
        }

        let weak = Rc::downgrade(&self.state);
        let on_move = host.add_observer(
            MouseEventKind::Move,
            observer(weak.clone(), |state, event| state.borrow_mut().on_move(event)),
        );
        let on_press = host.add_observer(
            MouseEventKind::LeftPress,
            observer(weak.clone(), |state, event| state.borrow_mut().on_press(event)),
        );
        let on_release = host.add_observer(MouseEventKind::LeftRelease, observer(weak, release));

        state.subscription = Some(Subscription {
            on_move,
            on_press,
            on_release,
        });
        log::debug!("affine widget enabled");
        Ok(())
    }

    /// Stops listening to mouse events.
    ///
    /// Any drag in progress is abandoned: the target gets its last committed
    /// matrix back and the release callback is not called. The hover
    /// highlight is cleared. Picking is turned off only if this widget turned
    /// it on, so a picker owned by someone else keeps working.
    pub fn disable(&self) {
        self.state.borrow_mut().disable();
    }

    /// Disables the widget and removes its geometry from the host.
    pub fn remove(&self) {
        self.state.borrow_mut().remove();
    }

    /// Pivot of rotations and anchor of the handles.
    pub fn origin(&self) -> Vec3 {
        self.state.borrow().origin
    }

    /// Moves the handles to a new origin without touching the target.
    ///
    /// Fails with [`VizkitError::DragInProgress`] during a drag.
    pub fn set_origin(&self, origin: Vec3) -> Result<()> {
        self.state.borrow_mut().set_origin(origin)
    }

    /// Sets the target and cached matrices to the identity and drops any
    /// drag in progress.
    pub fn reset(&self) {
        self.state.borrow_mut().reset();
    }

    /// The matrix committed at the end of the last drag.
    pub fn cached_matrix(&self) -> Mat4 {
        self.state.borrow().cached_matrix
    }

    /// The highlighted handle, if any.
    pub fn hovered_handle(&self) -> Option<HandleKind> {
        self.state.borrow().hovered.map(|handle| handle.kind)
    }

    /// The handle being dragged, if any.
    pub fn active_handle(&self) -> Option<HandleKind> {
        self.state.borrow().drag.map(|session| session.handle.kind)
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.state.borrow().drag.is_some()
    }

    /// Whether the widget listens to mouse events.
    pub fn is_enabled(&self) -> bool {
        self.state.borrow().subscription.is_some()
    }

    /// The gizmo handles, arrows first in axis order, then rings. Empty after
    /// [`remove`](Self::remove).
    pub fn handles(&self) -> Vec<Handle> {
        self.state.borrow().handles.clone()
    }

    /// Returns the handle of the given kind.
    pub fn handle(&self, kind: HandleKind) -> Option<Handle> {
        self.state
            .borrow()
            .handles
            .iter()
            .copied()
            .find(|handle| handle.kind == kind)
    }
}

impl Drop for AffineWidget {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.remove();
        }
    }
}

impl std::fmt::Debug for AffineWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("AffineWidget")
            .field("origin", &state.origin)
            .field("enabled", &state.subscription.is_some())
            .field("hovered", &state.hovered.map(|h| h.kind))
            .field("dragging", &state.drag.map(|s| s.handle.kind))
            .finish_non_exhaustive()
    }
}

/// Wraps a widget event handler so it does nothing once the widget is gone.
fn observer<F>(weak: Weak<RefCell<WidgetState>>, handler: F) -> Observer
where
    F: Fn(&Rc<RefCell<WidgetState>>, &MouseEvent) + 'static,
{
    Rc::new(RefCell::new(move |event: &MouseEvent| {
        if let Some(state) = weak.upgrade() {
            handler(&state, event);
        }
    }))
}

/// Ends the drag and hands the committed matrix to the callback.
///
/// The callback runs without the widget state borrowed, so it may call back
/// into the widget.
fn release(state: &Rc<RefCell<WidgetState>>, event: &MouseEvent) {
    let Some(committed) = state.borrow_mut().on_release(event) else {
        return;
    };
    let Some(mut callback) = state.borrow_mut().callback.take() else {
        return;
    };

    match catch_unwind(AssertUnwindSafe(|| callback(committed))) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => log::warn!("affine widget callback failed: {err}"),
        Err(_) => log::warn!("affine widget callback panicked"),
    }

    let mut state = state.borrow_mut();
    if state.callback.is_none() {
        state.callback = Some(callback);
    }
}

impl WidgetState {
    fn handle_for_mesh(&self, mesh: MeshId) -> Option<Handle> {
        self.handles.iter().copied().find(|handle| handle.mesh == mesh)
    }

    fn disable(&mut self) {
        let Some(subscription) = self.subscription.take() else {
            return;
        };
        let owns_picking = std::mem::take(&mut self.owns_picking);
        let hovered = self.hovered.take();
        let dragging = self.drag.take().is_some();

        if dragging {
            if let Some(target) = self.target.upgrade() {
                target.borrow_mut().set_user_matrix(self.cached_matrix);
            }
        }

        let Some(host) = self.host.upgrade() else {
            return;
        };
        let mut host = host.borrow_mut();
        for id in [
            subscription.on_move,
            subscription.on_press,
            subscription.on_release,
        ] {
            host.remove_observer(id);
        }
        if owns_picking {
            host.disable_picking();
        }
        if let Some(handle) = hovered {
            // The mesh may already be gone if the host was cleared.
            if let Err(err) =
                host.set_mesh_color(handle.mesh, self.axes_colors.get(handle.kind.axis()))
            {
                log::debug!("could not restore handle color: {err}");
            }
        }
        if dragging {
            host.set_interaction_mode(InteractionMode::Camera);
            host.render();
        }
        log::debug!("affine widget disabled");
    }

    fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.disable();
        self.removed = true;
        let handles = std::mem::take(&mut self.handles);
        if let Some(host) = self.host.upgrade() {
            let mut host = host.borrow_mut();
            for handle in handles {
                host.remove_mesh(handle.mesh);
            }
            host.render();
        }
        log::info!("affine widget removed");
    }

    fn set_origin(&mut self, origin: Vec3) -> Result<()> {
        if self.drag.is_some() {
            return Err(VizkitError::DragInProgress);
        }
        if !origin.is_finite() {
            return Err(VizkitError::InvalidArgument(format!(
                "origin must be finite, got {origin}"
            )));
        }
        if let Some(host) = self.host.upgrade() {
            let offset = Mat4::from_translation(origin - self.build_origin);
            let mut host = host.borrow_mut();
            let mut moved = Ok(());
            for handle in &self.handles {
                if let Err(err) = host.set_mesh_transform(handle.mesh, offset) {
                    log::debug!("handle {:?} not moved: {err}", handle.kind);
                    if moved.is_ok() {
                        moved = Err(err);
                    }
                }
            }
            // Every handle still registered has moved.
            self.origin = origin;
            host.render();
            return moved;
        }
        self.origin = origin;
        Ok(())
    }

    fn reset(&mut self) {
        self.cached_matrix = Mat4::IDENTITY;
        let dragging = self.drag.take().is_some();
        if let Some(target) = self.target.upgrade() {
            target.borrow_mut().set_user_matrix(Mat4::IDENTITY);
        }
        if let Some(host) = self.host.upgrade() {
            let mut host = host.borrow_mut();
            if dragging {
                host.set_interaction_mode(InteractionMode::Camera);
            }
            host.render();
        }
    }
}
