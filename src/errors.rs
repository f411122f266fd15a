//! Validation and pipeline errors

use crate::float_types::Real;
use crate::io::IoError;
use nalgebra::Point3;

/// Problems found while constructing geometry from raw points and faces
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (IndexOutOfRange) A face refers to a point that does not exist
    #[error("(IndexOutOfRange) Face {face} refers to point {index}, but only {len} points exist")]
    IndexOutOfRange { face: usize, index: usize, len: usize },
    /// (TooFewPoints) A face has fewer than three corners
    #[error("(TooFewPoints) Face {0} has fewer than 3 points")]
    TooFewPoints(usize),
    /// (DegenerateFace) All corners of a face are collinear or coincident
    #[error("(DegenerateFace) Face {face} has zero area near: {at}")]
    DegenerateFace { face: usize, at: Point3<Real> },
    /// (InvalidCoordinate) The coordinate has a NaN or infinite
    #[error("(InvalidCoordinate) The coordinate ({0}) has a NaN or infinite")]
    InvalidCoordinate(Point3<Real>),
}

/// Everything that can go wrong while building an engraved die
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    #[error("parameter `{name}` = {value} is invalid: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: Real,
        reason: &'static str,
    },

    #[error("malformed triangle buffer: {0}")]
    MalformedBuffer(String),

    #[error("triangle index {index} is out of range for {len} positions")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("face {0} has zero area, no normal can be computed")]
    DegenerateFace(usize),

    #[error("no glyph for character {0:?} in the selected font")]
    MissingGlyph(char),

    #[error("font error: {0}")]
    Font(String),

    #[error("invalid parameter file: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Io(#[from] IoError),
}
