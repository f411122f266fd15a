//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use dicecarve::{
    DiceParams, EngravedDie, Surface,
    float_types::Real,
    font::GlyphFont,
    mesh::{polygon::Polygon, vertex::Vertex},
};
use geo::Area;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

/// Returns the approximate bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// for a set of polygons.
pub fn bounding_box<S: Clone + Send + Sync + Debug>(polygons: &[Polygon<S>]) -> [Real; 6] {
    let mut bb = [Real::MAX, Real::MAX, Real::MAX, Real::MIN, Real::MIN, Real::MIN];

    for poly in polygons {
        for v in &poly.vertices {
            let p = v.pos;
            bb[0] = bb[0].min(p.x);
            bb[1] = bb[1].min(p.y);
            bb[2] = bb[2].min(p.z);
            bb[3] = bb[3].max(p.x);
            bb[4] = bb[4].max(p.y);
            bb[5] = bb[5].max(p.z);
        }
    }

    bb
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Helper to make a simple Polygon in 3D with given vertices.
pub fn make_polygon_3d(points: &[[Real; 3]]) -> Polygon<()> {
    let verts = points
        .iter()
        .map(|p| Vertex::new(Point3::new(p[0], p[1], p[2]), Vector3::z()))
        .collect();
    // Polygon::new re-computes the plane from the vertices anyway
    Polygon::new(verts, None)
}

/// Small, coarse die parameters that keep the CSG work in tests quick
pub fn small_die() -> DiceParams {
    DiceParams {
        dice_size: 3.0,
        font_size: 1.0,
        depth: 0.2,
        sphere_segments: 16,
        ..DiceParams::default()
    }
}

/// Volume the pockets should remove when every glyph lies wholly inside its
/// face: outline area, scaled in XY by `text_scale`, times `depth`.
pub fn pocket_volume(font: &dyn GlyphFont, numbers: &[u32], params: &DiceParams) -> Real {
    numbers
        .iter()
        .map(|n| {
            let outline = font.outline(&n.to_string(), params.font_size).expect("digits");
            outline.unsigned_area() * params.text_scale * params.text_scale * params.depth
        })
        .sum()
}

/// Every engraved vertex must sit between the face plane and `depth` below it
pub fn assert_pockets_within_depth(die: &EngravedDie, depth: Real) {
    let tol = 1e-6;
    for poly in &die.mesh.polygons {
        let Some(&Surface::Engraving(number)) = poly.metadata() else {
            continue;
        };
        let face = die
            .numbers
            .iter()
            .position(|&n| n == number)
            .expect("number was assigned");
        let frame = &die.frames[face];
        for v in &poly.vertices {
            let d = frame.normal.dot(&(v.pos - frame.center));
            assert!(
                d >= -depth - tol && d <= tol,
                "vertex of {number} at {d} from its face"
            );
        }
    }
}
