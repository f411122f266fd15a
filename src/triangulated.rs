//! A trait for any shape which can be represented by triangles

use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::mesh::vertex::Vertex;
use std::fmt::Debug;

/// A triangulated 3D surface.
///
/// Anything that can present itself as a bunch of triangles in 3D
/// can automatically use all the triangle-based IO backends.
pub trait Triangulated3D {
    /// Call `f` for each triangle.
    ///
    /// The triangle is `[v0, v1, v2]` with positions+normals, wound
    /// counter-clockwise seen from outside.
    fn visit_triangles<F>(&self, f: F)
    where
        F: FnMut([Vertex; 3]);

    /// Number of triangles `visit_triangles` will produce
    fn triangle_count(&self) -> usize {
        let mut count = 0;
        self.visit_triangles(|_| count += 1);
        count
    }
}

impl<S: Clone + Debug + Send + Sync> Triangulated3D for Mesh<S> {
    /// Every triangle carries its own facet normal, zero-area slivers are skipped
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Vertex; 3]),
    {
        for poly in &self.polygons {
            for [a, b, c] in poly.triangulate() {
                let n = (b.pos - a.pos).cross(&(c.pos - a.pos));
                let len = n.norm();
                if len <= Real::EPSILON {
                    continue;
                }
                let n = n / len;
                f([
                    Vertex::new(a.pos, n),
                    Vertex::new(b.pos, n),
                    Vertex::new(c.pos, n),
                ]);
            }
        }
    }
}
