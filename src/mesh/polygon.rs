//! Struct and functions for working with planar `Polygon`s without holes

use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::float_types::{EPSILON, Real};
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use geo::{Coord, LineString, Polygon as GeoPolygon, TriangulateEarcut};
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

/// A polygon, defined by a list of vertices.
/// - `S` is the generic metadata type, stored as `Option<S>`.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    /// Vertices defining the Polygon's shape
    pub vertices: Vec<Vertex>,

    /// The plane on which this Polygon lies, used for splitting
    pub plane: Plane,

    /// Generic metadata associated with the Polygon
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Polygon<S> {
    /// Create a polygon from vertices, computing its plane from them
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        assert!(vertices.len() >= 3, "degenerate polygon");

        let plane = Plane::from_vertices(&vertices);
        Polygon { vertices, plane, metadata }
    }

    /// Create a polygon that reuses an already known plane, e.g. a piece of
    /// a split polygon which must stay exactly on its parent's plane.
    pub const fn from_parts(vertices: Vec<Vertex>, plane: Plane, metadata: Option<S>) -> Self {
        Polygon { vertices, plane, metadata }
    }

    /// Reverses winding order, flips vertices normals, and flips the plane normal
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Return an iterator over paired vertices each forming an edge of the polygon
    pub fn edges(&self) -> impl Iterator<Item = (&Vertex, &Vertex)> {
        self.vertices.iter().zip(self.vertices.iter().cycle().skip(1))
    }

    /// Axis aligned bounding box of the vertices
    pub fn bounding_box(&self) -> Aabb {
        let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
        let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
        for v in &self.vertices {
            mins = mins.inf(&v.pos);
            maxs = maxs.sup(&v.pos);
        }
        Aabb::new(mins, maxs)
    }

    /// Area of the polygon
    pub fn area(&self) -> Real {
        let twice_area = self
            .edges()
            .fold(Vector3::zeros(), |acc, (a, b)| acc + a.pos.coords.cross(&b.pos.coords));
        0.5 * twice_area.dot(&self.plane.normal).abs()
    }

    /// Triangulate this polygon into a list of triangles, each triangle is [v0, v1, v2].
    ///
    /// Every triangle winds the same way as the polygon, and every vertex
    /// carries the plane normal.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let normal = self.plane.normal;
        let count = self.vertices.len();
        if count < 3 {
            return Vec::new();
        }
        if count == 3 {
            return vec![[
                Vertex::new(self.vertices[0].pos, normal),
                Vertex::new(self.vertices[1].pos, normal),
                Vertex::new(self.vertices[2].pos, normal),
            ]];
        }

        // Flatten into the plane's 2D basis and ear-clip there
        let (u, v) = build_orthonormal_basis(normal);
        let origin = self.vertices[0].pos;
        let ring: Vec<Coord<Real>> = self
            .vertices
            .iter()
            .map(|vert| {
                let offset = vert.pos - origin;
                Coord { x: offset.dot(&u), y: offset.dot(&v) }
            })
            .collect();

        let triangulation =
            GeoPolygon::new(LineString::new(ring), Vec::new()).earcut_triangles_raw();

        // earcut indices follow the ring order; reuse the exact 3D positions
        let lift = |idx: usize| -> Point3<Real> { self.vertices[idx % count].pos };

        triangulation
            .triangle_indices
            .chunks_exact(3)
            .filter_map(|tri| {
                let (a, mut b, mut c) = (lift(tri[0]), lift(tri[1]), lift(tri[2]));
                let winding = (b - a).cross(&(c - a));
                if winding.norm_squared() < EPSILON * EPSILON * EPSILON * EPSILON {
                    return None;
                }
                if winding.dot(&normal) < 0.0 {
                    std::mem::swap(&mut b, &mut c);
                }
                Some([
                    Vertex::new(a, normal),
                    Vertex::new(b, normal),
                    Vertex::new(c, normal),
                ])
            })
            .collect()
    }

    /// Recompute this polygon's plane from its vertices, then set all
    /// vertices' normals to match (flat shading).
    pub fn set_new_normal(&mut self) {
        self.plane = Plane::from_vertices(&self.vertices);
        let normal = self.plane.normal;
        for v in &mut self.vertices {
            v.normal = normal;
        }
    }

    /// Returns a reference to the metadata, if any.
    pub const fn metadata(&self) -> Option<&S> {
        self.metadata.as_ref()
    }

    /// Sets the metadata to the given value.
    pub fn set_metadata(&mut self, data: S) {
        self.metadata = Some(data);
    }
}

/// Given a normal vector `n`, build two perpendicular unit vectors `u` and `v` so that
/// {u, v, n} forms a right-handed orthonormal basis. `n` is assumed non‐zero.
pub fn build_orthonormal_basis(n: Vector3<Real>) -> (Vector3<Real>, Vector3<Real>) {
    let n = n.normalize();

    // Cross with the axis least aligned with `n`
    let other = if n.x.abs() < n.y.abs() && n.x.abs() < n.z.abs() {
        Vector3::x()
    } else if n.y.abs() < n.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };

    let v = n.cross(&other).normalize();
    let u = v.cross(&n).normalize();

    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pentagon() -> Polygon<u8> {
        let vertices = (0..5)
            .map(|i| {
                let a = i as Real * crate::float_types::TAU / 5.0;
                Vertex::new(Point3::new(a.cos(), a.sin(), 1.0), Vector3::z())
            })
            .collect();
        Polygon::new(vertices, Some(7))
    }

    #[test]
    fn triangulate_keeps_winding_and_area() {
        let poly = pentagon();
        let tris = poly.triangulate();
        assert_eq!(tris.len(), 3);
        let mut area = 0.0;
        for tri in &tris {
            let n = (tri[1].pos - tri[0].pos).cross(&(tri[2].pos - tri[0].pos));
            assert!(n.dot(&Vector3::z()) > 0.0);
            area += 0.5 * n.norm();
        }
        assert!((area - poly.area()).abs() < 1e-9);
    }

    #[test]
    fn flip_reverses_everything() {
        let mut poly = pentagon();
        let first = poly.vertices[0].pos;
        poly.flip();
        assert_eq!(poly.vertices[4].pos, first);
        assert!(poly.plane.normal.z < 0.0);
        assert!(poly.vertices.iter().all(|v| v.normal.z < 0.0));
        assert_eq!(poly.metadata(), Some(&7));
    }

    #[test]
    fn orthonormal_basis_is_right_handed() {
        let n = Vector3::new(0.3, -0.5, 0.8).normalize();
        let (u, v) = build_orthonormal_basis(n);
        assert!(u.dot(&v).abs() < 1e-12);
        assert!((u.cross(&v) - n).norm() < 1e-12);
    }
}
