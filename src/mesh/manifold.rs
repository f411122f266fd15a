use crate::float_types::Real;
use crate::mesh::Mesh;
use nalgebra::Point3;
use std::fmt::Debug;

#[cfg(feature = "hashmap")]
use hashbrown::HashMap;
#[cfg(not(feature = "hashmap"))]
use std::collections::HashMap;

const QUANTIZATION_FACTOR: Real = 1e7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct QuantizedPoint(i64, i64, i64);

fn quantize_point(p: &Point3<Real>) -> QuantizedPoint {
    QuantizedPoint(
        (p.x * QUANTIZATION_FACTOR).round() as i64,
        (p.y * QUANTIZATION_FACTOR).round() as i64,
        (p.z * QUANTIZATION_FACTOR).round() as i64,
    )
}

impl<S: Clone + Debug + Send + Sync> Mesh<S> {
    /// Count how often each undirected triangle edge occurs
    fn edge_counts(&self) -> HashMap<(QuantizedPoint, QuantizedPoint), u32> {
        let positions = self.triangle_positions();
        let mut edge_counts = HashMap::new();

        for tri in positions.chunks_exact(3) {
            for &(i0, i1) in &[(0, 1), (1, 2), (2, 0)] {
                let p0 = quantize_point(&tri[i0]);
                let p1 = quantize_point(&tri[i1]);
                if p0 == p1 {
                    continue;
                }
                // (p0, p1) and (p1, p0) share one key
                let key = if p0 < p1 { (p0, p1) } else { (p1, p0) };
                *edge_counts.entry(key).or_insert(0) += 1;
            }
        }
        edge_counts
    }

    /// Checks if the Mesh object is manifold
    ///
    /// ### Returns
    /// Returns `true` if every triangle edge appears exactly 2 times
    ///
    /// ### Notes:
    /// - Coordinates are compared after quantization, so vertices that differ
    ///   by less than about 1e-7 count as the same point.
    /// - BSP splits can leave T-junctions, where a long edge on one side meets
    ///   two shorter edges on the other. Such a surface is watertight but not
    ///   reported as manifold.
    pub fn is_manifold(&self) -> bool {
        self.edge_counts().values().all(|&count| count == 2)
    }

    /// Number of triangle edges used by exactly one triangle
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_counts().values().filter(|&&count| count == 1).count()
    }
}

#[cfg(test)]
mod tests {
    use crate::mesh::Mesh;

    #[test]
    fn closed_shapes_are_manifold() {
        assert!(Mesh::<()>::cube(2.0, None).is_manifold());
        assert!(Mesh::<()>::icosahedron(3.0, None).is_manifold());
    }

    #[test]
    fn removing_a_face_opens_the_surface() {
        let mut cube: Mesh<()> = Mesh::cube(1.0, None);
        cube.polygons.pop();
        assert!(!cube.is_manifold());
        assert_eq!(cube.boundary_edge_count(), 4);
    }
}
