//! Gizmo geometry: one arrow and one quarter ring per axis.

use glam::{Mat4, Vec3};
use vizkit_core::gizmo::{ARROW_LENGTH_FACTOR, RING_RADIUS_FACTOR};
use vizkit_core::mesh::{arrow, quarter_arc, tube, DEFAULT_RESOLUTION};
use vizkit_core::{
    AffineWidgetConfig, Axis, HandleKind, MeshStyle, Renderer, Result, TriangleMesh, VizkitError,
};

use super::Handle;

/// Places the XY quarter arc in the plane perpendicular to `axis`.
fn arc_orientation(axis: Axis) -> Mat4 {
    match axis {
        Axis::X => Mat4::from_rotation_y((-90.0f32).to_radians()),
        Axis::Y => Mat4::from_rotation_x(90.0f32.to_radians()),
        Axis::Z => Mat4::IDENTITY,
    }
}

/// Builds the six handle meshes, arrows first, in axis order.
pub(super) fn gizmo_meshes(
    origin: Vec3,
    target_length: f32,
    config: &AffineWidgetConfig,
) -> Result<Vec<(HandleKind, TriangleMesh)>> {
    let size = target_length * config.scale;
    let mut meshes = Vec::with_capacity(6);

    for axis in Axis::ALL {
        let mesh = arrow(
            origin,
            axis.unit(),
            size * ARROW_LENGTH_FACTOR,
            config.tip_radius,
            config.line_radius,
        )
        .ok_or_else(|| degenerate(HandleKind::Translation(axis)))?;
        meshes.push((HandleKind::Translation(axis), mesh));
    }

    let arc = quarter_arc();
    for axis in Axis::ALL {
        let placement = Mat4::from_translation(origin)
            * Mat4::from_scale(Vec3::splat(size * RING_RADIUS_FACTOR))
            * arc_orientation(axis);
        let points: Vec<Vec3> = arc.iter().map(|p| placement.transform_point3(*p)).collect();
        let mesh = tube(&points, config.line_radius * size, DEFAULT_RESOLUTION)
            .ok_or_else(|| degenerate(HandleKind::Rotation(axis)))?;
        meshes.push((HandleKind::Rotation(axis), mesh));
    }

    Ok(meshes)
}

fn degenerate(kind: HandleKind) -> VizkitError {
    VizkitError::InvalidArgument(format!("gizmo geometry for {kind:?} is degenerate"))
}

/// Registers handle meshes with the renderer in their axis colors.
pub(super) fn register<R>(
    renderer: &mut R,
    meshes: Vec<(HandleKind, TriangleMesh)>,
    config: &AffineWidgetConfig,
) -> Vec<Handle>
where
    R: Renderer + ?Sized,
{
    meshes
        .into_iter()
        .map(|(kind, mesh)| {
            let style = MeshStyle {
                color: config.axes_colors.get(kind.axis()),
                lighting: false,
                render_lines_as_tubes: !kind.is_translation(),
                always_on_top: config.always_visible,
            };
            let mesh = renderer.add_mesh(mesh, style);
            Handle { kind, mesh }
        })
        .collect()
}
