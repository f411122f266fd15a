use crate::errors::DiceError;
use crate::float_types::Real;
use crate::font::GlyphFont;
use geo::{Area, Contains, Coord, LineString, MultiPolygon, Point, Polygon};
use ttf_parser::{Face, OutlineBuilder};

/// Outlines from a TrueType/OpenType font file.
///
/// Curves are flattened into `curve_segments` straight pieces. Sizes are
/// normalised so the glyph `0` is exactly `size` tall, which keeps digit
/// heights comparable with [`crate::font::BlockFont`].
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    data: Vec<u8>,
    curve_segments: usize,
    /// Height of `0` in font units
    digit_height: Real,
    name: String,
}

impl TrueTypeFont {
    pub fn from_bytes(data: Vec<u8>, curve_segments: usize) -> Result<Self, DiceError> {
        let digit_height = {
            let face = parse(&data)?;
            let zero = face.glyph_index('0').ok_or(DiceError::MissingGlyph('0'))?;
            let rect = face
                .outline_glyph(zero, &mut ContourBuilder::new(1))
                .ok_or(DiceError::MissingGlyph('0'))?;
            Real::from(rect.y_max) - Real::from(rect.y_min)
        };
        if digit_height <= 0.0 {
            return Err(DiceError::Font("glyph '0' has no height".to_string()));
        }

        Ok(TrueTypeFont {
            data,
            curve_segments: curve_segments.max(1),
            digit_height,
            name: "truetype".to_string(),
        })
    }

    pub fn from_file(
        path: impl AsRef<std::path::Path>,
        curve_segments: usize,
    ) -> Result<Self, DiceError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(crate::io::IoError::from)?;
        let mut font = Self::from_bytes(data, curve_segments)?;
        font.name = path.display().to_string();
        Ok(font)
    }
}

fn parse(data: &[u8]) -> Result<Face<'_>, DiceError> {
    Face::from_slice(data, 0).map_err(|e| DiceError::Font(e.to_string()))
}

impl GlyphFont for TrueTypeFont {
    fn outline(&self, text: &str, size: Real) -> Result<MultiPolygon<Real>, DiceError> {
        let face = parse(&self.data)?;
        let scale = size / self.digit_height;

        let mut pen_x: Real = 0.0;
        let mut polygons = Vec::new();
        for ch in text.chars() {
            let glyph = face.glyph_index(ch).ok_or(DiceError::MissingGlyph(ch))?;

            let mut builder = ContourBuilder::new(self.curve_segments);
            // whitespace has no outline, only an advance
            if face.outline_glyph(glyph, &mut builder).is_some() {
                let placed = builder.contours.into_iter().map(|contour| {
                    contour
                        .into_iter()
                        .map(|c| Coord { x: (c.x + pen_x) * scale, y: c.y * scale })
                        .collect::<Vec<_>>()
                });
                polygons.extend(nest_contours(placed.map(LineString::from).collect()));
            }

            pen_x += face.glyph_hor_advance(glyph).map(Real::from).unwrap_or(0.0);
        }

        Ok(MultiPolygon::new(polygons))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Collects flattened glyph contours in font units
struct ContourBuilder {
    segments: usize,
    contours: Vec<Vec<Coord<Real>>>,
    current: Vec<Coord<Real>>,
}

impl ContourBuilder {
    fn new(segments: usize) -> Self {
        ContourBuilder { segments, contours: Vec::new(), current: Vec::new() }
    }

    fn last(&self) -> Coord<Real> {
        self.current.last().copied().unwrap_or(Coord { x: 0.0, y: 0.0 })
    }

    fn finish(&mut self) {
        let contour = std::mem::take(&mut self.current);
        if contour.len() >= 3 {
            self.contours.push(contour);
        }
    }
}

impl OutlineBuilder for ContourBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.finish();
        self.current.push(Coord { x: Real::from(x), y: Real::from(y) });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.current.push(Coord { x: Real::from(x), y: Real::from(y) });
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let p0 = self.last();
        let c = Coord { x: Real::from(x1), y: Real::from(y1) };
        let p = Coord { x: Real::from(x), y: Real::from(y) };
        for i in 1..=self.segments {
            let t = i as Real / self.segments as Real;
            let mt = 1.0 - t;
            self.current.push(p0 * (mt * mt) + c * (2.0 * mt * t) + p * (t * t));
        }
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let p0 = self.last();
        let c1 = Coord { x: Real::from(x1), y: Real::from(y1) };
        let c2 = Coord { x: Real::from(x2), y: Real::from(y2) };
        let p = Coord { x: Real::from(x), y: Real::from(y) };
        for i in 1..=self.segments {
            let t = i as Real / self.segments as Real;
            let mt = 1.0 - t;
            self.current.push(
                p0 * (mt * mt * mt)
                    + c1 * (3.0 * mt * mt * t)
                    + c2 * (3.0 * mt * t * t)
                    + p * (t * t * t),
            );
        }
    }

    fn close(&mut self) {
        self.finish();
    }
}

/// Sort closed contours into exteriors and holes by containment.
///
/// A contour inside an even number of others is an exterior, one inside an
/// odd number is a hole of its innermost container. Font winding rules are
/// not consulted, so fonts with either convention work.
pub(crate) fn nest_contours(contours: Vec<LineString<Real>>) -> Vec<Polygon<Real>> {
    let mut rings: Vec<(Real, Polygon<Real>)> = contours
        .into_iter()
        .map(|ring| {
            let poly = Polygon::new(ring, Vec::new());
            (poly.unsigned_area(), poly)
        })
        .filter(|(area, _)| *area > 0.0)
        .collect();
    // containers always come before what they contain
    rings.sort_by(|a, b| b.0.total_cmp(&a.0));

    // (depth, index of the exterior it belongs to)
    let mut placement: Vec<(usize, usize)> = Vec::with_capacity(rings.len());
    for i in 0..rings.len() {
        let first_point = rings[i].1.exterior().0.first().copied().map(Point::from);
        let container =
            first_point.and_then(|pt| (0..i).rev().find(|&j| rings[j].1.contains(&pt)));
        placement.push(match container {
            Some(j) => {
                let depth = placement[j].0 + 1;
                let owner = if depth % 2 == 1 { j } else { i };
                (depth, owner)
            },
            None => (0, i),
        });
    }

    let mut exteriors: Vec<Option<(LineString<Real>, Vec<LineString<Real>>)>> =
        rings.iter().map(|_| None).collect();
    for (i, &(depth, _)) in placement.iter().enumerate() {
        if depth % 2 == 0 {
            exteriors[i] = Some((rings[i].1.exterior().clone(), Vec::new()));
        }
    }
    for (i, &(depth, owner)) in placement.iter().enumerate() {
        if depth % 2 == 1 {
            if let Some((_, holes)) = exteriors[owner].as_mut() {
                holes.push(rings[i].1.exterior().clone());
            }
        }
    }

    exteriors
        .into_iter()
        .flatten()
        .map(|(exterior, holes)| Polygon::new(exterior, holes))
        .collect()
}
