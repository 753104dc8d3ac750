//! Mouse event handling: hover highlight and drag math.

use glam::{Mat4, Vec2, Vec3};
use vizkit_core::transform::{rotation_about_point, translate_along_axis};
use vizkit_core::{
    angle_between_degrees, project_onto_plane, Axis, HandleKind, InteractionMode, Interactor,
    MouseEvent,
};

use super::unproject::DragPlane;
use super::{DragSession, Handle, WidgetState};

impl WidgetState {
    pub(super) fn on_move(&mut self, event: &MouseEvent) {
        let Some(host) = self.host.upgrade() else {
            return;
        };
        let mut host = host.borrow_mut();

        if let Some(session) = self.drag {
            if self.drag_to(&*host, session, event.position) {
                host.render();
            }
            return;
        }

        let picked = host
            .pick(event.position)
            .and_then(|mesh| self.handle_for_mesh(mesh));
        let mut changed = false;

        if let Some(hovered) = self.hovered {
            if picked != Some(hovered) {
                self.set_handle_color(&mut *host, hovered, false);
                self.hovered = None;
                changed = true;
            }
        }
        if let (Some(handle), None) = (picked, self.hovered) {
            self.set_handle_color(&mut *host, handle, true);
            self.hovered = Some(handle);
            changed = true;
        }

        if changed {
            host.render();
        }
    }

    pub(super) fn on_press(&mut self, event: &MouseEvent) {
        if self.drag.is_some() {
            return;
        }
        let Some(handle) = self.hovered else {
            return;
        };
        let (Some(host), Some(target)) = (self.host.upgrade(), self.target.upgrade()) else {
            return;
        };
        let mut host = host.borrow_mut();

        // The matrix may have been edited since the last drag.
        if let Some(matrix) = target.borrow().user_matrix() {
            self.cached_matrix = matrix;
        }

        let plane = DragPlane::for_handle(handle.kind);
        let Some(init_position) =
            plane.world_point(&*host, event.position, self.origin, self.target_length)
        else {
            log::debug!("no drag plane point under {}; press ignored", event.position);
            return;
        };

        host.set_interaction_mode(InteractionMode::Widget);
        self.drag = Some(DragSession {
            handle,
            init_position,
        });
        log::debug!("drag started on {:?}", handle.kind);
    }

    /// Ends the drag and returns the committed matrix.
    ///
    /// Returns `None` if no drag was in progress.
    pub(super) fn on_release(&mut self, _event: &MouseEvent) -> Option<Mat4> {
        let session = self.drag.take()?;
        if let Some(host) = self.host.upgrade() {
            host.borrow_mut().set_interaction_mode(InteractionMode::Camera);
        }
        if let Some(matrix) = self
            .target
            .upgrade()
            .and_then(|target| target.borrow().user_matrix())
        {
            self.cached_matrix = matrix;
        }
        log::debug!("drag ended on {:?}", session.handle.kind);
        Some(self.cached_matrix)
    }

    /// Applies the drag at `position` to the target. Returns `false` if the
    /// event was skipped.
    fn drag_to(&self, host: &dyn Interactor, session: DragSession, position: Vec2) -> bool {
        let Some(target) = self.target.upgrade() else {
            return false;
        };
        let plane = DragPlane::for_handle(session.handle.kind);
        let Some(current) = plane.world_point(host, position, self.origin, self.target_length)
        else {
            log::debug!("no drag plane point under {position}; move skipped");
            return false;
        };

        let matrix = match session.handle.kind {
            HandleKind::Translation(axis) => {
                let delta = current - session.init_position;
                translate_along_axis(self.cached_matrix, axis, delta[axis.index()])
            }
            HandleKind::Rotation(axis) => {
                let Some(angle) = self.rotation_angle(axis, session.init_position, current) else {
                    log::debug!("drag point at the rotation pivot; move skipped");
                    return false;
                };
                rotation_about_point(self.origin, axis, angle) * self.cached_matrix
            }
        };

        target.borrow_mut().set_user_matrix(matrix);
        true
    }

    /// Signed angle in degrees from `init` to `current` about `axis`,
    /// measured around the origin.
    fn rotation_angle(&self, axis: Axis, init: Vec3, current: Vec3) -> Option<f32> {
        let normal = axis.unit();
        let from = project_onto_plane(init - self.origin, normal).try_normalize()?;
        let to = project_onto_plane(current - self.origin, normal).try_normalize()?;
        let angle = angle_between_degrees(from, to)?;
        if from.cross(to)[axis.index()] < 0.0 {
            Some(-angle)
        } else {
            Some(angle)
        }
    }

    fn set_handle_color(&self, host: &mut dyn Interactor, handle: Handle, highlighted: bool) {
        let color = if highlighted {
            self.highlight_color
        } else {
            self.axes_colors.get(handle.kind.axis())
        };
        if let Err(err) = host.set_mesh_color(handle.mesh, color) {
            log::warn!("cannot recolor {:?}: {err}", handle.kind);
        }
    }
}
