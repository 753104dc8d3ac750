//! Headless host viewport.
//!
//! [`HeadlessViewport`] keeps a registry of meshes, a camera, and a table of
//! mouse observers. It picks on the CPU by casting the camera ray through the
//! registered triangles, and counts render passes instead of drawing. Mouse
//! events are fed in through [`HeadlessViewport::dispatch`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3};
use vizkit_core::{
    CoordinateTransform, EventSource, InteractionMode, MeshId, MeshStyle, MouseEvent,
    MouseEventKind, Observer, ObserverId, Picker, Renderer, Result, TriangleMesh, VizkitError,
};

use crate::camera::Camera;
use crate::pick::ray_intersect_mesh;

/// A registered mesh.
#[derive(Debug, Clone)]
struct MeshEntry {
    mesh: TriangleMesh,
    style: MeshStyle,
    transform: Mat4,
}

/// A viewport without a window or GPU.
pub struct HeadlessViewport {
    camera: Camera,
    width: u32,
    height: u32,
    meshes: BTreeMap<MeshId, MeshEntry>,
    next_mesh_id: u64,
    observers: Vec<(ObserverId, MouseEventKind, Observer)>,
    next_observer_id: u64,
    picking_enabled: bool,
    hardware_picking: bool,
    interaction_mode: InteractionMode,
    render_count: usize,
}

impl HeadlessViewport {
    /// Creates a viewport of the given pixel size.
    ///
    /// The camera looks at the unit box around the origin from the
    /// isometric direction.
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Camera::new(aspect_ratio(width, height));
        camera.look_at_box_isometric(Vec3::splat(-0.5), Vec3::splat(0.5));
        Self {
            camera,
            width,
            height,
            meshes: BTreeMap::new(),
            next_mesh_id: 0,
            observers: Vec::new(),
            next_observer_id: 0,
            picking_enabled: false,
            hardware_picking: true,
            interaction_mode: InteractionMode::default(),
            render_count: 0,
        }
    }

    /// Sets whether the host reports picking support.
    #[must_use]
    pub fn with_hardware_picking(mut self, available: bool) -> Self {
        self.hardware_picking = available;
        self
    }

    /// Wraps the viewport for sharing with widgets.
    pub fn into_shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    /// Returns the camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Returns the camera mutably.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Resizes the viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.camera.set_aspect_ratio(aspect_ratio(width, height));
    }

    /// Viewport size in pixels.
    #[allow(clippy::cast_precision_loss)]
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Projects a world point to a screen position.
    pub fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        self.camera.world_to_screen(point, self.screen_size())
    }

    /// Number of registered meshes.
    pub fn num_meshes(&self) -> usize {
        self.meshes.len()
    }

    /// Returns a registered mesh.
    pub fn mesh(&self, id: MeshId) -> Option<&TriangleMesh> {
        self.meshes.get(&id).map(|entry| &entry.mesh)
    }

    /// Returns the style of a registered mesh.
    pub fn mesh_style(&self, id: MeshId) -> Option<MeshStyle> {
        self.meshes.get(&id).map(|entry| entry.style)
    }

    /// Returns the current color of a registered mesh.
    pub fn mesh_color(&self, id: MeshId) -> Option<Vec3> {
        self.meshes.get(&id).map(|entry| entry.style.color)
    }

    /// Returns the user transform of a registered mesh.
    pub fn mesh_transform(&self, id: MeshId) -> Option<Mat4> {
        self.meshes.get(&id).map(|entry| entry.transform)
    }

    /// Number of observers registered for an event kind.
    pub fn observer_count(&self, kind: MouseEventKind) -> usize {
        self.observers.iter().filter(|(_, k, _)| *k == kind).count()
    }

    /// Number of render passes issued so far.
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// Current mouse interaction mode.
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction_mode
    }

    fn is_observer_registered(&self, id: ObserverId) -> bool {
        self.observers.iter().any(|(other, _, _)| *other == id)
    }

    /// Delivers a mouse event to the observers registered for its kind.
    ///
    /// The viewport is not borrowed while observers run, so they may call
    /// back into it. Observers removed by an earlier observer of the same
    /// event are skipped.
    pub fn dispatch(this: &Rc<RefCell<Self>>, event: &MouseEvent) {
        let targets: Vec<(ObserverId, Observer)> = this
            .borrow()
            .observers
            .iter()
            .filter(|(_, kind, _)| *kind == event.kind)
            .map(|(id, _, observer)| (*id, Rc::clone(observer)))
            .collect();

        for (id, observer) in targets {
            if !this.borrow().is_observer_registered(id) {
                continue;
            }
            let Ok(mut callback) = observer.try_borrow_mut() else {
                log::warn!("observer {id:?} is already running; skipping re-entrant event");
                continue;
            };
            (&mut *callback)(event);
        }
    }
}

impl std::fmt::Debug for HeadlessViewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessViewport")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("meshes", &self.meshes.len())
            .field("observers", &self.observers.len())
            .field("picking_enabled", &self.picking_enabled)
            .field("interaction_mode", &self.interaction_mode)
            .finish_non_exhaustive()
    }
}

#[allow(clippy::cast_precision_loss)]
fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

impl Renderer for HeadlessViewport {
    fn add_mesh(&mut self, mesh: TriangleMesh, style: MeshStyle) -> MeshId {
        let id = MeshId(self.next_mesh_id);
        self.next_mesh_id += 1;
        self.meshes.insert(
            id,
            MeshEntry {
                mesh,
                style,
                transform: Mat4::IDENTITY,
            },
        );
        id
    }

    fn remove_mesh(&mut self, id: MeshId) -> bool {
        self.meshes.remove(&id).is_some()
    }

    fn set_mesh_color(&mut self, id: MeshId, color: Vec3) -> Result<()> {
        let entry = self.meshes.get_mut(&id).ok_or(VizkitError::UnknownMesh(id))?;
        entry.style.color = color;
        Ok(())
    }

    fn set_mesh_transform(&mut self, id: MeshId, transform: Mat4) -> Result<()> {
        let entry = self.meshes.get_mut(&id).ok_or(VizkitError::UnknownMesh(id))?;
        entry.transform = transform;
        Ok(())
    }

    fn render(&mut self) {
        self.render_count += 1;
        log::trace!("render pass {}", self.render_count);
    }

    fn set_interaction_mode(&mut self, mode: InteractionMode) {
        if self.interaction_mode != mode {
            log::debug!("interaction mode: {mode:?}");
        }
        self.interaction_mode = mode;
    }
}

impl Picker for HeadlessViewport {
    fn hardware_picking_available(&self) -> bool {
        self.hardware_picking
    }

    fn is_picking_enabled(&self) -> bool {
        self.picking_enabled
    }

    fn enable_picking(&mut self) {
        self.picking_enabled = true;
    }

    fn disable_picking(&mut self) {
        self.picking_enabled = false;
    }

    fn pick(&mut self, position: Vec2) -> Option<MeshId> {
        if !self.picking_enabled {
            return None;
        }
        let (origin, dir) = self.camera.screen_ray(position, self.screen_size())?;

        // Meshes drawn on top win over closer meshes drawn normally.
        self.meshes
            .iter()
            .filter_map(|(id, entry)| {
                ray_intersect_mesh(origin, dir, &entry.mesh, &entry.transform)
                    .map(|t| (*id, entry.style.always_on_top, t))
            })
            .min_by(|a, b| b.1.cmp(&a.1).then(a.2.total_cmp(&b.2)))
            .map(|(id, _, _)| id)
    }
}

impl CoordinateTransform for HeadlessViewport {
    fn display_to_world(&self, position: Vec2) -> Option<Vec3> {
        self.camera.display_to_world(position, self.screen_size())
    }

    fn projective_to_world(&self, position: Vec2) -> Option<Vec3> {
        self.camera.projective_to_world(position, self.screen_size())
    }

    fn view_direction(&self) -> Vec3 {
        self.camera.forward()
    }
}

impl EventSource for HeadlessViewport {
    fn add_observer(&mut self, kind: MouseEventKind, observer: Observer) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, kind, observer));
        id
    }

    fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(other, _, _)| *other != id);
        self.observers.len() != before
    }
}
