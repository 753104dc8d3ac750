//! Triangle mesh primitives for widget geometry.
//!
//! Provides the arrow, arc and tube primitives the gizmo builder is made of.
//! All meshes are plain triangle soups with shared vertices; no normals are
//! stored since widget geometry is drawn unlit.

use std::f32::consts::TAU;

use glam::{Mat4, Quat, UVec3, Vec3};

/// Tip length of an arrow, as a fraction of its total length.
pub const ARROW_TIP_LENGTH: f32 = 0.25;

/// Number of segments around arrows and tubes.
pub const DEFAULT_RESOLUTION: u32 = 20;

/// Segments in the full circle the quarter arc is cut from.
pub const CIRCLE_RESOLUTION: u32 = 100;

/// Points kept from that circle, spanning 0 to 90 degrees.
pub const QUARTER_ARC_POINTS: u32 = 26;

/// A triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Triangles as indices into `positions`.
    pub triangles: Vec<UVec3>,
}

impl TriangleMesh {
    /// Creates a mesh from vertices and triangles.
    #[must_use]
    pub fn new(positions: Vec<Vec3>, triangles: Vec<UVec3>) -> Self {
        Self {
            positions,
            triangles,
        }
    }

    /// Returns whether the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Returns the axis-aligned bounding box, or `None` for a mesh without vertices.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
        )
    }

    /// Returns the center of the bounding box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.bounds()
            .map_or(Vec3::ZERO, |(min, max)| (min + max) * 0.5)
    }

    /// Returns the length of the bounding-box diagonal.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.bounds().map_or(0.0, |(min, max)| (max - min).length())
    }

    /// Applies an affine transform to every vertex.
    pub fn transform(&mut self, matrix: &Mat4) {
        for p in &mut self.positions {
            *p = matrix.transform_point3(*p);
        }
    }

    /// Translates every vertex.
    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Appends another mesh, re-indexing its triangles.
    pub fn append(&mut self, other: &TriangleMesh) {
        let base = index(self.positions.len());
        self.positions.extend_from_slice(&other.positions);
        self.triangles
            .extend(other.triangles.iter().map(|t| *t + UVec3::splat(base)));
    }

    /// Iterates over triangles as vertex triples.
    pub fn triangle_vertices(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.triangles.iter().map(|t| {
            [
                self.positions[t.x as usize],
                self.positions[t.y as usize],
                self.positions[t.z as usize],
            ]
        })
    }
}

#[allow(clippy::cast_possible_truncation)]
fn index(value: usize) -> u32 {
    value as u32
}

/// Unit circle points in the XY plane starting on +X, counter-clockwise.
fn ring(resolution: u32) -> impl Iterator<Item = (f32, f32)> {
    (0..resolution).map(move |k| {
        #[allow(clippy::cast_precision_loss)]
        let angle = TAU * k as f32 / resolution as f32;
        (angle.cos(), angle.sin())
    })
}

/// Appends a ring of vertices around the X axis at `x` and returns its first index.
fn push_x_ring(positions: &mut Vec<Vec3>, x: f32, radius: f32, resolution: u32) -> u32 {
    let start = index(positions.len());
    positions.extend(ring(resolution).map(|(c, s)| Vec3::new(x, radius * c, radius * s)));
    start
}

/// Connects two rings of equal resolution with quads.
fn stitch(triangles: &mut Vec<UVec3>, a: u32, b: u32, resolution: u32) {
    for k in 0..resolution {
        let k1 = (k + 1) % resolution;
        triangles.push(UVec3::new(a + k, b + k, b + k1));
        triangles.push(UVec3::new(a + k, b + k1, a + k1));
    }
}

/// Closes a ring with a fan around `apex`.
fn fan(triangles: &mut Vec<UVec3>, ring_start: u32, apex: u32, resolution: u32) {
    for k in 0..resolution {
        let k1 = (k + 1) % resolution;
        triangles.push(UVec3::new(ring_start + k, apex, ring_start + k1));
    }
}

/// Builds an arrow from `start` pointing along `direction`.
///
/// The arrow is a unit arrow (shaft of length `1 - ARROW_TIP_LENGTH` plus a
/// cone tip) scaled uniformly by `scale`, so the radii are relative to the
/// total length. Returns `None` if `direction` has zero length.
#[must_use]
pub fn arrow(
    start: Vec3,
    direction: Vec3,
    scale: f32,
    tip_radius: f32,
    shaft_radius: f32,
) -> Option<TriangleMesh> {
    let dir = direction.try_normalize()?;
    let res = DEFAULT_RESOLUTION;
    let shaft_end = 1.0 - ARROW_TIP_LENGTH;

    let mut positions = Vec::new();
    let mut triangles = Vec::new();

    let base_center = index(positions.len());
    positions.push(Vec3::ZERO);
    let shaft_bottom = push_x_ring(&mut positions, 0.0, shaft_radius, res);
    let shaft_top = push_x_ring(&mut positions, shaft_end, shaft_radius, res);
    fan(&mut triangles, shaft_bottom, base_center, res);
    stitch(&mut triangles, shaft_bottom, shaft_top, res);

    let tip_base_center = index(positions.len());
    positions.push(Vec3::new(shaft_end, 0.0, 0.0));
    let tip_base = push_x_ring(&mut positions, shaft_end, tip_radius, res);
    let apex = index(positions.len());
    positions.push(Vec3::X);
    fan(&mut triangles, tip_base, tip_base_center, res);
    fan(&mut triangles, tip_base, apex, res);

    let mut mesh = TriangleMesh::new(positions, triangles);
    let placement = Mat4::from_scale_rotation_translation(
        Vec3::splat(scale),
        Quat::from_rotation_arc(Vec3::X, dir),
        start,
    );
    mesh.transform(&placement);
    Some(mesh)
}

/// Returns the polyline of a quarter unit circle in the XY plane.
///
/// The points are the first [`QUARTER_ARC_POINTS`] points of a
/// [`CIRCLE_RESOLUTION`]-segment circle, from +X to +Y.
#[must_use]
pub fn quarter_arc() -> Vec<Vec3> {
    ring(CIRCLE_RESOLUTION)
        .take(QUARTER_ARC_POINTS as usize)
        .map(|(c, s)| Vec3::new(c, s, 0.0))
        .collect()
}

/// Extrudes an open polyline into a tube of absolute `radius`.
///
/// Cross-sections are oriented by parallel transport along the polyline so
/// the tube does not twist. The ends are left open. Returns `None` if the
/// polyline has fewer than two distinct points.
#[must_use]
pub fn tube(points: &[Vec3], radius: f32, sides: u32) -> Option<TriangleMesh> {
    if points.len() < 2 || sides < 3 {
        return None;
    }

    let tangents: Vec<Vec3> = (0..points.len())
        .map(|i| {
            let prev = points[i.saturating_sub(1)];
            let next = points[(i + 1).min(points.len() - 1)];
            (next - prev).try_normalize()
        })
        .collect::<Option<_>>()?;

    let mut normal = tangents[0].any_orthonormal_vector();
    let mut positions = Vec::with_capacity(points.len() * sides as usize);
    let mut triangles = Vec::new();

    for (i, (point, tangent)) in points.iter().zip(&tangents).enumerate() {
        if i > 0 {
            normal = (normal - normal.dot(*tangent) * *tangent)
                .try_normalize()
                .unwrap_or_else(|| tangent.any_orthonormal_vector());
        }
        let binormal = tangent.cross(normal);
        positions.extend(
            ring(sides).map(|(c, s)| *point + radius * (c * normal + s * binormal)),
        );
        if i > 0 {
            let a = index((i - 1) * sides as usize);
            let b = index(i * sides as usize);
            stitch(&mut triangles, a, b, sides);
        }
    }

    Some(TriangleMesh::new(positions, triangles))
}

/// Builds an axis-aligned cube with edge length `size` centered on `center`.
#[must_use]
pub fn cube(center: Vec3, size: f32) -> TriangleMesh {
    let h = size * 0.5;
    let positions = (0..8u32)
        .map(|k| {
            let corner = Vec3::new(
                if k & 1 == 0 { -h } else { h },
                if k & 2 == 0 { -h } else { h },
                if k & 4 == 0 { -h } else { h },
            );
            center + corner
        })
        .collect();
    let faces: [[u32; 4]; 6] = [
        [0, 2, 3, 1],
        [4, 5, 7, 6],
        [0, 1, 5, 4],
        [2, 6, 7, 3],
        [0, 4, 6, 2],
        [1, 3, 7, 5],
    ];
    let triangles = faces
        .iter()
        .flat_map(|[a, b, c, d]| [UVec3::new(*a, *b, *c), UVec3::new(*a, *c, *d)])
        .collect();
    TriangleMesh::new(positions, triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_arc_span() {
        let arc = quarter_arc();
        assert_eq!(arc.len(), QUARTER_ARC_POINTS as usize);
        assert!((arc[0] - Vec3::X).length() < 1e-6);
        assert!((arc[arc.len() - 1] - Vec3::Y).length() < 1e-5);
        for p in &arc {
            assert!((p.length() - 1.0).abs() < 1e-5);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_arrow_extent() {
        let start = Vec3::new(1.0, 2.0, 3.0);
        let mesh = arrow(start, Vec3::Y * 4.0, 2.0, 0.05, 0.02).unwrap();
        let (min, max) = mesh.bounds().unwrap();
        assert!((min.y - start.y).abs() < 1e-5);
        assert!((max.y - (start.y + 2.0)).abs() < 1e-5);
        // Widest part is the tip cone: radius 0.05 scaled by 2.
        assert!((max.x - (start.x + 0.1)).abs() < 1e-5);
        for t in &mesh.triangles {
            assert!((t.max_element() as usize) < mesh.positions.len());
        }
    }

    #[test]
    fn test_arrow_zero_direction() {
        assert!(arrow(Vec3::ZERO, Vec3::ZERO, 1.0, 0.1, 0.05).is_none());
    }

    #[test]
    fn test_tube_surrounds_polyline() {
        let arc = quarter_arc();
        let mesh = tube(&arc, 0.1, DEFAULT_RESOLUTION).unwrap();
        assert_eq!(mesh.positions.len(), arc.len() * DEFAULT_RESOLUTION as usize);
        assert_eq!(
            mesh.triangles.len(),
            (arc.len() - 1) * DEFAULT_RESOLUTION as usize * 2
        );
        for (i, p) in arc.iter().enumerate() {
            let ring = &mesh.positions
                [i * DEFAULT_RESOLUTION as usize..(i + 1) * DEFAULT_RESOLUTION as usize];
            for v in ring {
                assert!(((*v - *p).length() - 0.1).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_tube_degenerate() {
        assert!(tube(&[Vec3::ZERO], 0.1, 8).is_none());
        assert!(tube(&[Vec3::ZERO, Vec3::ZERO], 0.1, 8).is_none());
    }

    #[test]
    fn test_bounds_and_append() {
        let mut a = TriangleMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![UVec3::new(0, 1, 2)],
        );
        let mut b = a.clone();
        b.translate(Vec3::Z);
        a.append(&b);
        assert_eq!(a.triangles[1], UVec3::new(3, 4, 5));
        assert_eq!(a.bounds(), Some((Vec3::ZERO, Vec3::ONE)));
        assert_eq!(a.center(), Vec3::splat(0.5));
        assert!((a.length() - 3f32.sqrt()).abs() < 1e-6);
        assert_eq!(TriangleMesh::default().bounds(), None);
    }

    #[test]
    fn test_cube_extent() {
        let mesh = cube(Vec3::new(0.0, 1.0, 0.0), 2.0);
        assert_eq!(mesh.positions.len(), 8);
        assert_eq!(mesh.triangles.len(), 12);
        assert_eq!(
            mesh.bounds(),
            Some((Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0)))
        );
    }
}
