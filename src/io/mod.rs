//! Mesh export and import

mod stl;

pub use stl::{StlFormat, to_stl_ascii};
#[cfg(feature = "stl-io")]
pub use stl::to_stl_binary;

/// Generic I/O and format‑conversion errors.
///
/// Binary STL needs the `stl-io` feature; without it the binary paths
/// report [`IoError::Unimplemented`].
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("std::io::Error: {0}")]
    StdIo(#[from] std::io::Error),

    #[error("Input is malformed: {0}")]
    MalformedInput(String),

    #[error("Feature is not implemented: {0}")]
    Unimplemented(String),
}
