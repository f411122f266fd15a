//! Digit outlines for engraving: a built-in block font and, behind the
//! `truetype-text` feature, any TrueType/OpenType font file.

use crate::errors::DiceError;
use crate::float_types::Real;
use geo::MultiPolygon;

mod block;
pub use block::BlockFont;

#[cfg(feature = "truetype-text")]
mod truetype;
#[cfg(feature = "truetype-text")]
pub use truetype::TrueTypeFont;

/// Something that turns text into 2D outlines.
///
/// Characters are laid out left to right with their baseline on y = 0, and
/// digits are `size` units tall.
pub trait GlyphFont: Send + Sync {
    fn outline(&self, text: &str, size: Real) -> Result<MultiPolygon<Real>, DiceError>;

    /// Short name for log output
    fn name(&self) -> &str;
}
