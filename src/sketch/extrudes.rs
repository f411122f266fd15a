//! Linear extrusion of a `Sketch` into a closed `Mesh`

use crate::float_types::{EPSILON, Real};
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use crate::sketch::Sketch;
use geo::orient::Direction;
use geo::{LineString, Orient, TriangulateEarcut};
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

impl<S: Clone + Send + Sync + Debug> Sketch<S> {
    /// Extrude from z = 0 up to z = `height`
    pub fn extrude(&self, height: Real) -> Mesh<S> {
        self.extrude_between(0.0, height)
    }

    /// Sweep the outlines along +Z from `z0` to `z1`, producing a closed solid.
    ///
    /// Caps are ear-clipped (holes included) and every ring gets a band of side
    /// quads. Rings are re-oriented first, so the result faces outward whatever
    /// winding the outlines came in with.
    pub fn extrude_between(&self, z0: Real, z1: Real) -> Mesh<S> {
        let (z0, z1) = if z0 <= z1 { (z0, z1) } else { (z1, z0) };
        if z1 - z0 < EPSILON {
            return Mesh::from_polygons(&[], self.metadata.clone());
        }

        let oriented = self.geometry.orient(Direction::Default);
        let mut polygons = Vec::new();

        for poly2d in &oriented {
            // caps
            let triangulation = poly2d.earcut_triangles_raw();
            let flat = &triangulation.vertices;
            for tri in triangulation.triangle_indices.chunks_exact(3) {
                let corner = |k: usize, z: Real| {
                    Point3::new(flat[2 * tri[k]], flat[2 * tri[k] + 1], z)
                };
                let (a, b, c) = (corner(0, 0.0), corner(1, 0.0), corner(2, 0.0));
                let winding = (b - a).cross(&(c - a)).z;
                if winding.abs() < EPSILON * EPSILON {
                    continue;
                }
                // earcut output follows the exterior (CCW); guard anyway
                let (i1, i2) = if winding > 0.0 { (1, 2) } else { (2, 1) };

                let top = vec![
                    Vertex::new(corner(0, z1), Vector3::z()),
                    Vertex::new(corner(i1, z1), Vector3::z()),
                    Vertex::new(corner(i2, z1), Vector3::z()),
                ];
                let bottom = vec![
                    Vertex::new(corner(0, z0), -Vector3::z()),
                    Vertex::new(corner(i2, z0), -Vector3::z()),
                    Vertex::new(corner(i1, z0), -Vector3::z()),
                ];
                polygons.push(Polygon::new(top, self.metadata.clone()));
                polygons.push(Polygon::new(bottom, self.metadata.clone()));
            }

            // walls
            let rings = std::iter::once(poly2d.exterior()).chain(poly2d.interiors());
            for ring in rings {
                polygons.extend(wall_band(ring, z0, z1, &self.metadata));
            }
        }

        Mesh::from_polygons(&polygons, self.metadata.clone())
    }
}

/// Side quads for one ring. Exterior rings run CCW and holes CW, so the
/// outward side of every edge is on its right.
fn wall_band<S: Clone + Send + Sync + Debug>(
    ring: &LineString<Real>,
    z0: Real,
    z1: Real,
    metadata: &Option<S>,
) -> Vec<Polygon<S>> {
    ring.lines()
        .filter_map(|line| {
            let d = line.delta();
            if d.x.hypot(d.y) < EPSILON {
                return None;
            }
            let normal = Vector3::new(d.y, -d.x, 0.0).normalize();
            let (a, b) = (line.start, line.end);
            Some(Polygon::new(
                vec![
                    Vertex::new(Point3::new(a.x, a.y, z0), normal),
                    Vertex::new(Point3::new(b.x, b.y, z0), normal),
                    Vertex::new(Point3::new(b.x, b.y, z1), normal),
                    Vertex::new(Point3::new(a.x, a.y, z1), normal),
                ],
                metadata.clone(),
            ))
        })
        .collect()
}
