//! Tunable die parameters, loadable from JSON

use crate::dice::{GlyphOrientation, Numbering};
use crate::errors::DiceError;
use crate::float_types::Real;
use crate::io::IoError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `(name, min, max)` for every continuous parameter
pub const RANGES: [(&str, Real, Real); 5] = [
    ("dice_size", 1.0, 10.0),
    ("font_size", 0.5, 3.0),
    ("depth", 0.1, 1.0),
    ("text_scale", 0.5, 2.0),
    ("rounding", 0.0, 1.0),
];

/// Everything that shapes the die. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiceParams {
    /// Circumradius of the icosahedron
    pub dice_size: Real,
    /// Digit height before `text_scale`
    pub font_size: Real,
    /// How far the digits are cut into the faces
    pub depth: Real,
    /// Extra horizontal and vertical scale of the digit outline
    pub text_scale: Real,
    /// 0 keeps sharp corners, 1 rounds down to the midradius sphere
    pub rounding: Real,
    pub numbering: Numbering,
    pub orientation: GlyphOrientation,
    pub mark_six_nine: bool,
    /// Segments around the rounding sphere
    pub sphere_segments: usize,
    /// Straight pieces per font curve
    pub curve_segments: usize,
}

impl Default for DiceParams {
    fn default() -> Self {
        DiceParams {
            dice_size: 5.0,
            font_size: 1.5,
            depth: 0.4,
            text_scale: 1.0,
            rounding: 0.0,
            numbering: Numbering::default(),
            orientation: GlyphOrientation::default(),
            mark_six_nine: false,
            sphere_segments: 48,
            curve_segments: 12,
        }
    }
}

impl DiceParams {
    fn values(&self) -> [Real; 5] {
        [self.dice_size, self.font_size, self.depth, self.text_scale, self.rounding]
    }

    fn values_mut(&mut self) -> [&mut Real; 5] {
        [
            &mut self.dice_size,
            &mut self.font_size,
            &mut self.depth,
            &mut self.text_scale,
            &mut self.rounding,
        ]
    }

    /// Reject values no geometry can be built from.
    ///
    /// Values outside the slider ranges are fine here; see [`DiceParams::clamped`].
    pub fn validate(&self) -> Result<(), DiceError> {
        for (&value, &(name, _, _)) in self.values().iter().zip(RANGES.iter()) {
            if !value.is_finite() {
                return Err(DiceError::InvalidParameter { name, value, reason: "must be finite" });
            }
            let positive_required = name != "rounding";
            if positive_required && value <= 0.0 {
                return Err(DiceError::InvalidParameter { name, value, reason: "must be positive" });
            }
            if !positive_required && value < 0.0 {
                return Err(DiceError::InvalidParameter {
                    name,
                    value,
                    reason: "must not be negative",
                });
            }
        }
        if self.sphere_segments < 8 {
            return Err(DiceError::InvalidParameter {
                name: "sphere_segments",
                value: self.sphere_segments as Real,
                reason: "needs at least 8 segments",
            });
        }
        if self.curve_segments == 0 {
            return Err(DiceError::InvalidParameter {
                name: "curve_segments",
                value: 0.0,
                reason: "needs at least 1 segment",
            });
        }
        Ok(())
    }

    /// Copy with every continuous value clamped into its range, warning for
    /// each value that moved. NaN stays NaN so `validate` still catches it.
    pub fn clamped(&self) -> Self {
        let mut out = self.clone();
        for (slot, &(name, min, max)) in out.values_mut().into_iter().zip(RANGES.iter()) {
            let clamped = slot.clamp(min, max);
            if clamped != *slot && !slot.is_nan() {
                log::warn!("{name} = {} is outside [{min}, {max}], using {clamped}", *slot);
                *slot = clamped;
            }
        }
        out
    }

    pub fn from_json_str(json: &str) -> Result<Self, DiceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DiceError> {
        let text = std::fs::read_to_string(path).map_err(IoError::from)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, DiceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_inside_ranges() {
        let params = DiceParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.clamped(), params);
    }

    #[test]
    fn clamp_moves_only_out_of_range_values() {
        let params = DiceParams { depth: 5.0, font_size: 0.1, ..DiceParams::default() };
        let clamped = params.clamped();
        assert_eq!(clamped.depth, 1.0);
        assert_eq!(clamped.font_size, 0.5);
        assert_eq!(clamped.dice_size, 5.0);
    }
}
