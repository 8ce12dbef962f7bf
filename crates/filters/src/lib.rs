//! Filters over grids, tables and point sets
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod reverse;
mod table;
mod translate;
mod voxelize;

#[doc(inline)]
pub use reverse::ReverseImageDataAxii;

#[doc(inline)]
pub use table::TableToGrid;

#[doc(inline)]
pub use translate::{Corner, TranslateGridOrigin};

#[doc(inline)]
pub use voxelize::{CellSize, VoxelizePoints, SAFE_SPACING};

#[doc(inline)]
pub use error::{Error, Result};
