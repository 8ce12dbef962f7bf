//! ws3dinv magnetotelluric inversion meshes
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod mesh;
mod reader;

#[doc(inline)]
pub use mesh::{parse_ws3d, MODEL_NAME};

#[doc(inline)]
pub use reader::WsMeshReader;

#[doc(inline)]
pub use error::{Error, Result};
