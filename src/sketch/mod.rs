//! `Sketch` struct: planar outlines in the XY plane that extrude into `Mesh`s

use crate::float_types::Real;
use geo::{
    AffineOps, AffineTransform, BoundingRect, Coord, MultiPolygon, Polygon as GeoPolygon,
    Rect,
};
use std::fmt::Debug;

pub mod extrudes;

/// A set of 2D polygons (with holes) plus metadata carried onto every
/// polygon of the extruded mesh.
#[derive(Clone, Debug)]
pub struct Sketch<S> {
    /// Outlines in the XY plane
    pub geometry: MultiPolygon<Real>,

    /// Metadata
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Sketch<S> {
    /// Returns a new empty Sketch
    pub fn new() -> Self {
        Sketch {
            geometry: MultiPolygon::new(Vec::new()),
            metadata: None,
        }
    }

    pub fn from_geo(geometry: MultiPolygon<Real>, metadata: Option<S>) -> Self {
        Sketch { geometry, metadata }
    }

    /// Single polygon from an outer ring, no holes
    pub fn polygon(points: &[[Real; 2]], metadata: Option<S>) -> Self {
        let ring: Vec<Coord<Real>> = points.iter().map(|&[x, y]| Coord { x, y }).collect();
        let poly = GeoPolygon::new(ring.into(), Vec::new());
        Sketch::from_geo(MultiPolygon::new(vec![poly]), metadata)
    }

    /// Axis-aligned rectangle from (0, 0) to (width, height)
    pub fn rectangle(width: Real, height: Real, metadata: Option<S>) -> Self {
        Self::polygon(
            &[[0.0, 0.0], [width, 0.0], [width, height], [0.0, height]],
            metadata,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty()
    }

    /// Bounding rectangle of all outlines, `None` when empty
    pub fn bounding_rect(&self) -> Option<Rect<Real>> {
        self.geometry.bounding_rect()
    }

    pub fn translate(&self, dx: Real, dy: Real) -> Self {
        self.affine(&AffineTransform::translate(dx, dy))
    }

    /// Scale about the origin
    pub fn scale(&self, sx: Real, sy: Real) -> Self {
        self.affine(&AffineTransform::scale(sx, sy, Coord { x: 0.0, y: 0.0 }))
    }

    /// Move the centre of the bounding rectangle to the origin
    pub fn center(&self) -> Self {
        match self.bounding_rect() {
            Some(rect) => {
                let c = rect.center();
                self.translate(-c.x, -c.y)
            },
            None => self.clone(),
        }
    }

    fn affine(&self, transform: &AffineTransform<Real>) -> Self {
        Sketch {
            geometry: self.geometry.affine_transform(transform),
            metadata: self.metadata.clone(),
        }
    }
}

impl<S: Clone + Send + Sync + Debug> Default for Sketch<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn center_moves_bounding_rect_to_origin() {
        let sketch: Sketch<()> = Sketch::rectangle(4.0, 2.0, None).translate(10.0, -3.0);
        let rect = sketch.center().bounding_rect().expect("not empty");
        assert_relative_eq!(rect.min().x, -2.0);
        assert_relative_eq!(rect.max().y, 1.0);
    }

    #[test]
    fn scale_is_about_origin() {
        let sketch: Sketch<()> = Sketch::rectangle(1.0, 1.0, None).translate(1.0, 1.0);
        let rect = sketch.scale(2.0, 3.0).bounding_rect().expect("not empty");
        assert_relative_eq!(rect.min().x, 2.0);
        assert_relative_eq!(rect.max().y, 6.0);
    }

    #[test]
    fn empty_sketch_has_no_rect() {
        let sketch: Sketch<()> = Sketch::new();
        assert!(sketch.is_empty());
        assert!(sketch.bounding_rect().is_none());
    }
}
