//! 3D shapes as `Mesh`s

use crate::errors::ValidationError;
use crate::float_types::{EPSILON, PI, Real, TAU};
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

/// Face order of the regular icosahedron, counter-clockwise seen from outside.
///
/// Die numbering walks faces in this order, so it must stay fixed.
pub const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// The 12 icosahedron corners on the unit sphere, built on the golden ratio
fn icosahedron_unit_points() -> [[Real; 3]; 12] {
    // golden ratio
    let phi: Real = (1.0 + (5.0 as Real).sqrt()) * 0.5;
    // normalise so the circum-radius is 1
    let inv_len = (1.0 + phi * phi).sqrt().recip();
    let a = inv_len;
    let b = phi * inv_len;

    [
        [-a, b, 0.0],
        [a, b, 0.0],
        [-a, -b, 0.0],
        [a, -b, 0.0],
        [0.0, -a, b],
        [0.0, a, b],
        [0.0, -a, -b],
        [0.0, a, -b],
        [b, 0.0, -a],
        [b, 0.0, a],
        [-b, 0.0, -a],
        [-b, 0.0, a],
    ]
}

/// Ratio of the icosahedron's midradius (centre to edge midpoint) to its
/// circumradius.
pub fn icosahedron_midradius_ratio() -> Real {
    let phi: Real = (1.0 + (5.0 as Real).sqrt()) * 0.5;
    phi / (1.0 + phi * phi).sqrt()
}

/// Regular icosahedron as an indexed triangle buffer: positions scaled to
/// circumradius `radius`, and three indices per face in [`ICOSAHEDRON_FACES`] order.
pub fn icosahedron_buffer(radius: Real) -> (Vec<Point3<Real>>, Vec<u32>) {
    let positions = icosahedron_unit_points()
        .iter()
        .map(|&[x, y, z]| Point3::new(x * radius, y * radius, z * radius))
        .collect();
    let indices = ICOSAHEDRON_FACES
        .iter()
        .flat_map(|face| face.iter().map(|&i| i as u32))
        .collect();
    (positions, indices)
}

impl<S: Clone + Debug + Send + Sync> Mesh<S> {
    /// Build polygons from points and already validated faces
    fn from_faces<F: AsRef<[usize]>>(
        points: &[Point3<Real>],
        faces: &[F],
        metadata: Option<S>,
    ) -> Mesh<S> {
        let polygons: Vec<Polygon<S>> = faces
            .iter()
            .map(|face| {
                let vertices = face
                    .as_ref()
                    .iter()
                    .map(|&idx| Vertex::new(points[idx], Vector3::zeros()))
                    .collect();
                let mut poly = Polygon::new(vertices, metadata.clone());
                poly.set_new_normal();
                poly
            })
            .collect();
        Mesh::from_polygons(&polygons, metadata)
    }

    /// Create a right prism (a box) that spans from (0, 0, 0)
    /// to (width, length, height). All dimensions must be >= 0.
    pub fn cuboid(width: Real, length: Real, height: Real, metadata: Option<S>) -> Mesh<S> {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(width, 0.0, 0.0),
            Point3::new(width, length, 0.0),
            Point3::new(0.0, length, 0.0),
            Point3::new(0.0, 0.0, height),
            Point3::new(width, 0.0, height),
            Point3::new(width, length, height),
            Point3::new(0.0, length, height),
        ];

        // counter-clockwise seen from outside
        let faces = [
            [0, 3, 2, 1], // bottom
            [4, 5, 6, 7], // top
            [0, 1, 5, 4], // front
            [3, 7, 6, 2], // back
            [0, 4, 7, 3], // left
            [1, 2, 6, 5], // right
        ];

        Self::from_faces(&points, &faces, metadata)
    }

    pub fn cube(width: Real, metadata: Option<S>) -> Mesh<S> {
        Self::cuboid(width, width, width, metadata)
    }

    /// UV sphere centred at the origin with poles on the Y axis.
    ///
    /// Caps are triangles, every other band is a planar quad. The vertices lie
    /// on the sphere, so the faceted surface sits slightly inside `radius`.
    pub fn sphere(
        radius: Real,
        segments: usize,
        stacks: usize,
        metadata: Option<S>,
    ) -> Mesh<S> {
        let segments = segments.max(3);
        let stacks = stacks.max(2);

        let ring_point = |i: usize, j: usize| -> Point3<Real> {
            let theta = TAU * (i % segments) as Real / segments as Real;
            let phi = PI * j as Real / stacks as Real;
            let ring_radius = radius * phi.sin();
            Point3::new(ring_radius * theta.cos(), radius * phi.cos(), ring_radius * theta.sin())
        };
        let north = Point3::new(0.0, radius, 0.0);
        let south = Point3::new(0.0, -radius, 0.0);

        let mut polygons = Vec::with_capacity(segments * stacks);
        let vertex = |p: Point3<Real>| Vertex::new(p, p.coords / radius);

        for j in 0..stacks {
            for i in 0..segments {
                let ring: Vec<Point3<Real>> = if j == 0 {
                    vec![north, ring_point(i + 1, 1), ring_point(i, 1)]
                } else if j == stacks - 1 {
                    vec![south, ring_point(i, j), ring_point(i + 1, j)]
                } else {
                    vec![
                        ring_point(i, j),
                        ring_point(i + 1, j),
                        ring_point(i + 1, j + 1),
                        ring_point(i, j + 1),
                    ]
                };
                polygons.push(Polygon::new(
                    ring.into_iter().map(vertex).collect(),
                    metadata.clone(),
                ));
            }
        }

        Mesh::from_polygons(&polygons, metadata)
    }

    /// Creates a polyhedron from a list of points and faces (indices into `points`).
    ///
    /// Faces must wind counter-clockwise seen from outside.
    ///
    /// ```
    /// # use dicecarve::mesh::Mesh;
    /// let pts = &[
    ///     [0.0, 0.0, 0.0],
    ///     [1.0, 0.0, 0.0],
    ///     [1.0, 1.0, 0.0],
    ///     [0.0, 1.0, 0.0],
    ///     [0.5, 0.5, 1.0],
    /// ];
    /// let faces: &[&[usize]] = &[&[0, 3, 2, 1], &[0, 1, 4], &[1, 2, 4], &[2, 3, 4], &[3, 0, 4]];
    /// let pyramid = Mesh::<()>::polyhedron(pts, faces, None).unwrap();
    /// assert_eq!(pyramid.polygons.len(), 5);
    /// ```
    pub fn polyhedron(
        points: &[[Real; 3]],
        faces: &[&[usize]],
        metadata: Option<S>,
    ) -> Result<Mesh<S>, ValidationError> {
        let points: Vec<Point3<Real>> = points
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect();

        if let Some(bad) = points.iter().find(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(ValidationError::InvalidCoordinate(*bad));
        }

        for (face_idx, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(ValidationError::TooFewPoints(face_idx));
            }
            if let Some(&index) = face.iter().find(|&&idx| idx >= points.len()) {
                return Err(ValidationError::IndexOutOfRange {
                    face: face_idx,
                    index,
                    len: points.len(),
                });
            }

            // Newell area vector; zero for collinear or coincident corners
            let twice_area = face
                .iter()
                .zip(face.iter().cycle().skip(1))
                .fold(Vector3::zeros(), |acc, (&a, &b)| {
                    acc + points[a].coords.cross(&points[b].coords)
                });
            if twice_area.norm() < EPSILON * EPSILON {
                return Err(ValidationError::DegenerateFace {
                    face: face_idx,
                    at: points[face[0]],
                });
            }
        }

        Ok(Self::from_faces(&points, faces, metadata))
    }

    /// Regular icosahedron with circumradius `radius`, faces in
    /// [`ICOSAHEDRON_FACES`] order.
    pub fn icosahedron(radius: Real, metadata: Option<S>) -> Mesh<S> {
        let (positions, _) = icosahedron_buffer(radius);
        Self::from_faces(&positions, &ICOSAHEDRON_FACES, metadata)
    }
}
