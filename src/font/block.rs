use crate::errors::DiceError;
use crate::float_types::Real;
use crate::font::GlyphFont;
use geo::{Coord, LineString, MultiPolygon, Polygon};

/// Cells per digit: 3 wide, 5 tall, plus a one cell gap after each digit
const CELL_ROWS: Real = 5.0;
const ADVANCE: Real = 4.0;

type Ring = &'static [(u8, u8)];

/// Digit shapes on the cell grid, `(exterior, holes)`
fn digit_cells(digit: char) -> Option<(Ring, &'static [Ring])> {
    const BOX: Ring = &[(0, 0), (3, 0), (3, 5), (0, 5)];
    let cells: (Ring, &'static [Ring]) = match digit {
        '0' => (BOX, &[&[(1, 1), (2, 1), (2, 4), (1, 4)]]),
        '1' => (
            &[(0, 0), (3, 0), (3, 1), (2, 1), (2, 5), (0, 5), (0, 4), (1, 4), (1, 1), (0, 1)],
            &[],
        ),
        '2' => (
            &[
                (0, 0), (3, 0), (3, 1), (1, 1), (1, 2), (3, 2),
                (3, 5), (0, 5), (0, 4), (2, 4), (2, 3), (0, 3),
            ],
            &[],
        ),
        '3' => (
            &[
                (0, 0), (3, 0), (3, 5), (0, 5), (0, 4), (2, 4),
                (2, 3), (1, 3), (1, 2), (2, 2), (2, 1), (0, 1),
            ],
            &[],
        ),
        '4' => (
            &[(2, 0), (3, 0), (3, 5), (2, 5), (2, 3), (1, 3), (1, 5), (0, 5), (0, 2), (2, 2)],
            &[],
        ),
        '5' => (
            &[
                (0, 0), (3, 0), (3, 3), (1, 3), (1, 4), (3, 4),
                (3, 5), (0, 5), (0, 2), (2, 2), (2, 1), (0, 1),
            ],
            &[],
        ),
        '6' => (
            &[(0, 0), (3, 0), (3, 3), (1, 3), (1, 4), (3, 4), (3, 5), (0, 5)],
            &[&[(1, 1), (2, 1), (2, 2), (1, 2)]],
        ),
        '7' => (&[(2, 0), (3, 0), (3, 5), (0, 5), (0, 4), (2, 4)], &[]),
        '8' => (
            BOX,
            &[&[(1, 1), (2, 1), (2, 2), (1, 2)], &[(1, 3), (2, 3), (2, 4), (1, 4)]],
        ),
        '9' => (
            &[(0, 0), (3, 0), (3, 5), (0, 5), (0, 2), (2, 2), (2, 1), (0, 1)],
            &[&[(1, 3), (2, 3), (2, 4), (1, 4)]],
        ),
        _ => return None,
    };
    Some(cells)
}

/// Built-in 3x5 block digit font.
///
/// Needs no font file, and its straight edges keep the engraving cuts cheap.
#[derive(Debug, Clone, Default)]
pub struct BlockFont {
    /// Put a bar under 6 and 9 so they can be told apart on a die
    pub mark_six_nine: bool,
}

impl BlockFont {
    pub const fn new(mark_six_nine: bool) -> Self {
        BlockFont { mark_six_nine }
    }
}

fn ring(cells: Ring, offset_x: Real, offset_y: Real, cell: Real) -> LineString<Real> {
    cells
        .iter()
        .map(|&(x, y)| Coord {
            x: (x as Real + offset_x) * cell,
            y: (y as Real + offset_y) * cell,
        })
        .collect::<Vec<_>>()
        .into()
}

impl GlyphFont for BlockFont {
    fn outline(&self, text: &str, size: Real) -> Result<MultiPolygon<Real>, DiceError> {
        let cell = size / CELL_ROWS;
        // only a lone 6 or 9 reads the same upside down as its partner
        let underline = self.mark_six_nine && matches!(text, "6" | "9");
        let mut polygons = Vec::new();

        for (i, ch) in text.chars().enumerate() {
            let (exterior, holes) = digit_cells(ch).ok_or(DiceError::MissingGlyph(ch))?;
            let pen = i as Real * ADVANCE;

            polygons.push(Polygon::new(
                ring(exterior, pen, 0.0, cell),
                holes.iter().map(|h| ring(h, pen, 0.0, cell)).collect(),
            ));

            if underline {
                // one cell gap below the baseline
                polygons.push(Polygon::new(
                    ring(&[(0, 0), (3, 0), (3, 1), (0, 1)], pen, -2.0, cell),
                    Vec::new(),
                ));
            }
        }

        Ok(MultiPolygon::new(polygons))
    }

    fn name(&self) -> &str {
        "block"
    }
}
