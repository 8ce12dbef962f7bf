//! Delimited text, point and packed binary readers
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod binary;
mod centers;
mod delimited;
mod error;
mod points;

#[doc(inline)]
pub use binary::PackedBinaryReader;

#[doc(inline)]
pub use centers::CellCenterWriter;

#[doc(inline)]
pub use delimited::{field_names, DelimitedTextReader, TitleStyle};

#[doc(inline)]
pub use points::{table_to_points, DelimitedPointsReader};

#[doc(inline)]
pub use error::{Error, Result};
