//! Oriented planes and polygon splitting for the BSP tree

use crate::float_types::{EPSILON, Real};
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

// Plane classification constants; combined with bitwise OR per polygon.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// Polygon pieces produced by [`Plane::split_polygon`]:
/// `(coplanar_front, coplanar_back, front, back)`.
pub type SplitResult<S> = (Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>, Vec<Polygon<S>>);

/// An oriented plane `normal · p = w`
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Unit normal vector of the plane
    pub normal: Vector3<Real>,
    /// Signed distance from the origin along `normal`
    pub w: Real,
}

impl Plane {
    /// Create a plane from a (not necessarily unit) normal and offset
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        let len = normal.norm();
        if len < EPSILON {
            return Plane { normal: Vector3::z(), w: 0.0 };
        }
        Plane { normal: normal / len, w: w / len }
    }

    /// Create a plane from three points.
    /// The normal direction follows the right-hand rule: (p2-p1) × (p3-p1)
    pub fn from_points(p1: Point3<Real>, p2: Point3<Real>, p3: Point3<Real>) -> Self {
        let normal = (p2 - p1).cross(&(p3 - p1));
        if normal.norm_squared() < Real::EPSILON * Real::EPSILON {
            // Degenerate triangle, return default plane
            return Plane { normal: Vector3::z(), w: 0.0 };
        }
        let normal = normal.normalize();
        let w = normal.dot(&p1.coords);
        Plane { normal, w }
    }

    /// Build the plane of a planar polygon using Newell's method, which
    /// stays stable when the first corners happen to be nearly collinear.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        if vertices.len() < 3 {
            return Plane { normal: Vector3::z(), w: 0.0 };
        }

        let mut normal = Vector3::zeros();
        let mut centroid = Vector3::zeros();
        for (curr, next) in vertices.iter().zip(vertices.iter().cycle().skip(1)) {
            let (c, n) = (curr.pos, next.pos);
            normal.x += (c.y - n.y) * (c.z + n.z);
            normal.y += (c.z - n.z) * (c.x + n.x);
            normal.z += (c.x - n.x) * (c.y + n.y);
            centroid += c.coords;
        }
        centroid /= vertices.len() as Real;

        if normal.norm_squared() < Real::EPSILON * Real::EPSILON {
            return Self::from_points(vertices[0].pos, vertices[1].pos, vertices[2].pos);
        }
        let normal = normal.normalize();
        Plane { normal, w: normal.dot(&centroid) }
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    /// Flip the plane (reverse normal and offset)
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance of `point` from the plane
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a point as FRONT, BACK or COPLANAR (within `EPSILON`)
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let t = self.signed_distance(point);
        if t < -EPSILON {
            BACK
        } else if t > EPSILON {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Classify a polygon; the result is the OR of all its vertex classes
    pub fn classify_polygon<S: Clone>(&self, polygon: &Polygon<S>) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.pos))
    }

    /// Split `polygon` by this plane.
    ///
    /// Coplanar polygons go to `coplanar_front` when they face the same way as
    /// the plane and to `coplanar_back` otherwise. Spanning polygons are cut
    /// along the plane; the pieces keep the parent's plane and metadata.
    pub fn split_polygon<S: Clone + Send + Sync + Debug>(
        &self,
        polygon: &Polygon<S>,
    ) -> SplitResult<S> {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let count = polygon.vertices.len();
                let mut split_front = Vec::with_capacity(count + 1);
                let mut split_back = Vec::with_capacity(count + 1);

                for i in 0..count {
                    let j = (i + 1) % count;
                    let (type_i, type_j) = (types[i], types[j]);
                    let vertex_i = &polygon.vertices[i];
                    let vertex_j = &polygon.vertices[j];

                    if type_i != BACK {
                        split_front.push(vertex_i.clone());
                    }
                    if type_i != FRONT {
                        split_back.push(vertex_i.clone());
                    }

                    // The edge crosses the plane: both halves get the crossing point
                    if (type_i | type_j) == SPANNING {
                        let denom = self.normal.dot(&(vertex_j.pos - vertex_i.pos));
                        if denom.abs() > Real::EPSILON {
                            let t = (self.w - self.normal.dot(&vertex_i.pos.coords)) / denom;
                            let crossing = vertex_i.interpolate(vertex_j, t);
                            split_front.push(crossing.clone());
                            split_back.push(crossing);
                        }
                    }
                }

                if split_front.len() >= 3 {
                    front.push(Polygon::from_parts(
                        split_front,
                        polygon.plane.clone(),
                        polygon.metadata.clone(),
                    ));
                }
                if split_back.len() >= 3 {
                    back.push(Polygon::from_parts(
                        split_back,
                        polygon.plane.clone(),
                        polygon.metadata.clone(),
                    ));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(z: Real) -> Polygon<()> {
        Polygon::new(
            vec![
                Vertex::new(Point3::new(-1.0, -1.0, z), Vector3::z()),
                Vertex::new(Point3::new(1.0, -1.0, z), Vector3::z()),
                Vertex::new(Point3::new(1.0, 1.0, z), Vector3::z()),
                Vertex::new(Point3::new(-1.0, 1.0, z), Vector3::z()),
            ],
            None,
        )
    }

    #[test]
    fn newell_plane_of_square() {
        let poly = square(2.0);
        assert!((poly.plane.normal - Vector3::z()).norm() < 1e-12);
        assert!((poly.plane.w - 2.0).abs() < 1e-12);
    }

    #[test]
    fn split_spanning_square() {
        let plane = Plane::from_normal(Vector3::x(), 0.0);
        let (cf, cb, front, back) = plane.split_polygon(&square(0.0));
        assert!(cf.is_empty() && cb.is_empty());
        assert_eq!(front.len(), 1);
        assert_eq!(back.len(), 1);
        assert!(front[0].vertices.iter().all(|v| v.pos.x >= -EPSILON));
        assert!(back[0].vertices.iter().all(|v| v.pos.x <= EPSILON));
        // both halves keep the parent plane
        assert_eq!(front[0].plane, back[0].plane);
    }

    #[test]
    fn split_coplanar_by_facing() {
        let plane = Plane::from_normal(Vector3::z(), 0.0);
        let (cf, cb, _, _) = plane.split_polygon(&square(0.0));
        assert_eq!((cf.len(), cb.len()), (1, 0));

        let mut flipped = square(0.0);
        flipped.flip();
        let (cf, cb, _, _) = plane.split_polygon(&flipped);
        assert_eq!((cf.len(), cb.len()), (0, 1));
    }

    #[test]
    fn orient_point_respects_tolerance() {
        let plane = Plane::from_points(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        assert_eq!(plane.orient_point(&Point3::new(0.0, 0.0, EPSILON * 0.5)), COPLANAR);
        assert_eq!(plane.orient_point(&Point3::new(0.0, 0.0, 1.0)), FRONT);
        assert_eq!(plane.orient_point(&Point3::new(0.0, 0.0, -1.0)), BACK);
    }
}
