//! Self-contained JSON and base64 uniform grids
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod header;
mod reader;
mod writer;

#[doc(inline)]
pub use header::{default_array_name, ArrayEntry, PvgpHeader};

#[doc(inline)]
pub use reader::{grid_from_header, read_pvgp_grid, PvgpGridReader};

#[doc(inline)]
pub use writer::PvgpWriter;

#[doc(inline)]
pub use error::{Error, Result};
