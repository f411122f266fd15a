//! Procedural **twenty-sided dice** with engraved numbers, carved by
//! **Constructive Solid Geometry (CSG)**: boolean operations (*union*,
//! *difference*, *intersection*) on sets of polygons stored in [BSP](mesh::bsp) trees.
//!
//! The die is a regular icosahedron. Each face gets a frame (centre, outward
//! normal, apex), a digit outline is extruded into a cutting tool sitting on
//! that frame, and the tools are subtracted from the die one face at a time.
//!
//! ```
//! use dicecarve::{DiceParams, build_die, font::BlockFont};
//!
//! let params = DiceParams { dice_size: 3.0, ..DiceParams::default() };
//! let die = build_die(&params, &BlockFont::default()).unwrap();
//! assert_eq!(die.numbers.len(), 20);
//! assert!(die.removed_volume() > 0.0);
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): binary `.stl` export and `.stl` import
//! - **truetype-text**: engrave with TrueType fonts `.ttf`
//! - **hashmap**: enables use of hashbrown for `is_manifold` and `boundary_edge_count`
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to build the cutting tools on several threads

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod cli;
pub mod dice;
pub mod errors;
pub mod float_types;
pub mod font;
pub mod io;
pub mod mesh;
pub mod sketch;
pub mod traits;
pub mod triangulated;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use dice::{
    DiceBuilder, DiceParams, EngravedDie, FaceFrame, GlyphOrientation, Numbering, Surface,
    build_die,
};
pub use errors::{DiceError, ValidationError};
pub use traits::CSG;
