//! `Mesh` struct and implementations of the `CSG` trait for `Mesh`

use crate::float_types::{
    Real,
    parry3d::bounding_volume::{Aabb, BoundingVolume},
};
use crate::mesh::{bsp::Node, plane::Plane, polygon::Polygon, vertex::Vertex};
use crate::traits::CSG;
use nalgebra::{Matrix4, Point3, partial_max, partial_min};
use std::{fmt::Debug, sync::OnceLock};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub mod bsp;
pub mod manifold;
pub mod plane;
pub mod polygon;
pub mod shapes;
pub mod vertex;

#[derive(Clone, Debug)]
pub struct Mesh<S: Clone + Send + Sync + Debug> {
    /// 3D polygons for volumetric shapes
    pub polygons: Vec<Polygon<S>>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,

    /// Metadata
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Mesh<S> {
    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: &[Polygon<S>], metadata: Option<S>) -> Self {
        let mut mesh = Mesh::new();
        mesh.polygons = polygons.to_vec();
        mesh.metadata = metadata;
        mesh
    }

    /// Split polygons into (may_touch, cannot_touch) using bounding‑box tests
    fn partition_polys(
        polys: &[Polygon<S>],
        other_bb: &Aabb,
    ) -> (Vec<Polygon<S>>, Vec<Polygon<S>>) {
        polys
            .iter()
            .cloned()
            .partition(|p| p.bounding_box().intersects(other_bb))
    }

    /// Helper to collect all vertices from the mesh.
    #[cfg(not(feature = "parallel"))]
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.clone())
            .collect()
    }

    /// Parallel helper to collect all vertices from the mesh.
    #[cfg(feature = "parallel")]
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .par_iter()
            .flat_map(|p| p.vertices.clone())
            .collect()
    }

    /// Triangulate each polygon in the Mesh returning a Mesh containing triangles
    pub fn triangulate(&self) -> Mesh<S> {
        let triangles = self
            .polygons
            .iter()
            .flat_map(|poly| {
                poly.triangulate().into_iter().map(move |triangle| {
                    Polygon::from_parts(
                        triangle.to_vec(),
                        poly.plane.clone(),
                        poly.metadata.clone(),
                    )
                })
            })
            .collect::<Vec<_>>();

        Mesh::from_polygons(&triangles, self.metadata.clone())
    }

    /// Renormalize all polygons in this Mesh by re-computing each polygon’s plane
    /// and assigning that plane’s normal to all vertices.
    pub fn renormalize(&mut self) {
        for poly in &mut self.polygons {
            poly.set_new_normal();
        }
    }

    /// Non-indexed triangle positions, three consecutive points per face,
    /// wound counter-clockwise when seen from outside.
    pub fn triangle_positions(&self) -> Vec<Point3<Real>> {
        self.polygons
            .iter()
            .flat_map(|poly| poly.triangulate())
            .flat_map(|[a, b, c]| [a.pos, b.pos, c.pos])
            .collect()
    }

    /// Enclosed volume via the divergence theorem.
    ///
    /// Positive for a closed, outward-facing surface; meaningless for open ones.
    pub fn volume(&self) -> Real {
        let positions = self.triangle_positions();
        positions
            .chunks_exact(3)
            .map(|tri| tri[0].coords.dot(&tri[1].coords.cross(&tri[2].coords)))
            .sum::<Real>()
            / 6.0
    }

    /// Total area of all polygons
    pub fn surface_area(&self) -> Real {
        self.polygons.iter().map(|p| p.area()).sum()
    }
}

impl<S: Clone + Send + Sync + Debug> CSG for Mesh<S> {
    /// Returns a new empty Mesh
    fn new() -> Self {
        Mesh {
            polygons: Vec::new(),
            bounding_box: OnceLock::new(),
            metadata: None,
        }
    }

    /// Return a new Mesh representing union of the two Meshes.
    ///
    /// ```text
    /// let c = a.union(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    fn union(&self, other: &Mesh<S>) -> Mesh<S> {
        // avoid splitting obvious non‑intersecting faces
        let (a_clip, a_passthru) =
            Self::partition_polys(&self.polygons, &other.bounding_box());
        let (b_clip, b_passthru) =
            Self::partition_polys(&other.polygons, &self.bounding_box());

        let mut a = Node::from_polygons(&a_clip);
        let mut b = Node::from_polygons(&b_clip);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());

        // combine results and untouched faces
        let mut final_polys = a.all_polygons();
        final_polys.extend(a_passthru);
        final_polys.extend(b_passthru);

        Mesh {
            polygons: final_polys,
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Return a new Mesh representing difference of the two Meshes.
    ///
    /// ```text
    /// let c = a.difference(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn difference(&self, other: &Mesh<S>) -> Mesh<S> {
        // avoid splitting obvious non‑intersecting faces
        let (a_clip, a_passthru) =
            Self::partition_polys(&self.polygons, &other.bounding_box());
        let (b_clip, _b_passthru) =
            Self::partition_polys(&other.polygons, &self.bounding_box());

        let mut a = Node::from_polygons(&a_clip);
        let mut b = Node::from_polygons(&b_clip);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        // combine results and untouched faces
        let mut final_polys = a.all_polygons();
        final_polys.extend(a_passthru);

        Mesh {
            polygons: final_polys,
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Return a new Mesh representing intersection of the two Meshes.
    ///
    /// ```text
    /// let c = a.intersection(b);
    ///     +-------+
    ///     |       |
    ///     |   a   |
    ///     |    +--+----+   =   +--+
    ///     +----+--+    |       +--+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn intersection(&self, other: &Mesh<S>) -> Mesh<S> {
        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(&b.all_polygons());
        a.invert();

        Mesh {
            polygons: a.all_polygons(),
            bounding_box: OnceLock::new(),
            metadata: self.metadata.clone(),
        }
    }

    /// Apply an arbitrary 3D transform (as a 4x4 matrix) to the mesh.
    ///
    /// Normals go through the inverse transpose. A mirroring matrix reverses
    /// the winding so the surface keeps facing outward.
    fn transform(&self, mat: &Matrix4<Real>) -> Mesh<S> {
        let normal_matrix = mat.try_inverse().map(|inv| inv.transpose());
        let mirrored = mat.fixed_view::<3, 3>(0, 0).determinant() < 0.0;
        let mut mesh = self.clone();

        for poly in &mut mesh.polygons {
            for vert in &mut poly.vertices {
                let homog_pos = mat * vert.pos.to_homogeneous();
                vert.pos = Point3::from_homogeneous(homog_pos)
                    .unwrap_or_else(|| Point3::from(homog_pos.xyz()));

                if let Some(nm) = &normal_matrix {
                    let n = nm.transform_vector(&vert.normal);
                    if n.norm_squared() > 0.0 {
                        vert.normal = n.normalize();
                    }
                }
            }

            if mirrored {
                poly.vertices.reverse();
            }

            // keep the cached plane consistent with the new vertex positions
            poly.plane = Plane::from_vertices(&poly.vertices);
            if normal_matrix.is_none() {
                poly.set_new_normal();
            }
        }

        // invalidate the old cached bounding box
        mesh.bounding_box = OnceLock::new();

        mesh
    }

    /// Returns a [`parry3d::bounding_volume::Aabb`] indicating the 3D bounds of all `polygons`.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            // Track overall min/max in x, y, z among all 3D polygons
            let mut min_x = Real::MAX;
            let mut min_y = Real::MAX;
            let mut min_z = Real::MAX;
            let mut max_x = -Real::MAX;
            let mut max_y = -Real::MAX;
            let mut max_z = -Real::MAX;

            for poly in &self.polygons {
                for v in &poly.vertices {
                    min_x = *partial_min(&min_x, &v.pos.x).unwrap_or(&min_x);
                    min_y = *partial_min(&min_y, &v.pos.y).unwrap_or(&min_y);
                    min_z = *partial_min(&min_z, &v.pos.z).unwrap_or(&min_z);

                    max_x = *partial_max(&max_x, &v.pos.x).unwrap_or(&max_x);
                    max_y = *partial_max(&max_y, &v.pos.y).unwrap_or(&max_y);
                    max_z = *partial_max(&max_z, &v.pos.z).unwrap_or(&max_z);
                }
            }

            // If still uninitialized (e.g., no polygons), return a trivial AABB at origin
            if min_x > max_x {
                return Aabb::new(Point3::origin(), Point3::origin());
            }

            Aabb::new(
                Point3::new(min_x, min_y, min_z),
                Point3::new(max_x, max_y, max_z),
            )
        })
    }

    /// Invalidates object's cached bounding box.
    fn invalidate_bounding_box(&mut self) {
        self.bounding_box = OnceLock::new();
    }

    /// Invert this Mesh (flip inside vs. outside)
    fn inverse(&self) -> Mesh<S> {
        let mut mesh = self.clone();
        for p in &mut mesh.polygons {
            p.flip();
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn cube_volume_and_area() {
        let cube: Mesh<()> = Mesh::cube(2.0, None);
        assert_relative_eq!(cube.volume(), 8.0, epsilon = 1e-9);
        assert_relative_eq!(cube.surface_area(), 24.0, epsilon = 1e-9);
        assert_eq!(cube.triangle_positions().len(), 36);
    }

    #[test]
    fn mirror_transform_keeps_outward_winding() {
        let cube: Mesh<()> = Mesh::cube(1.0, None);
        let mirrored = cube.scale(-1.0, 1.0, 1.0);
        assert_relative_eq!(mirrored.volume(), 1.0, epsilon = 1e-9);

        let bb = mirrored.bounding_box();
        assert_relative_eq!(bb.mins.x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(bb.maxs.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn singular_transform_does_not_panic() {
        let cube: Mesh<()> = Mesh::cube(1.0, None);
        let flat = cube.scale(1.0, 1.0, 0.0);
        assert_relative_eq!(flat.volume(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn inverse_negates_volume() {
        let cube: Mesh<()> = Mesh::cube(1.0, None).translate(3.0, 0.0, 0.0);
        assert_relative_eq!(cube.inverse().volume(), -1.0, epsilon = 1e-9);
        assert_eq!(
            cube.inverse().polygons[0].plane.normal,
            -cube.polygons[0].plane.normal
        );
    }

    #[test]
    fn bounding_box_cache_is_invalidated() {
        let mut cube: Mesh<()> = Mesh::cube(1.0, None);
        assert_relative_eq!(cube.bounding_box().maxs.z, 1.0);
        for poly in &mut cube.polygons {
            for v in &mut poly.vertices {
                v.pos += Vector3::new(0.0, 0.0, 1.0);
            }
        }
        cube.invalidate_bounding_box();
        assert_relative_eq!(cube.bounding_box().maxs.z, 2.0);
    }
}
