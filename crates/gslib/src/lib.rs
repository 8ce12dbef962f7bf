//! GSLIB and SGeMS readers and writers
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod reader;
mod sgems;
mod writer;

#[doc(inline)]
pub use reader::{GslibPointSetReader, GslibReader};

#[doc(inline)]
pub use sgems::{parse_sgems_header, SgemsGridReader, SGEMS_MASK};

#[doc(inline)]
pub use writer::{GslibWriter, SgemsWriter, DEFAULT_HEADER};

#[doc(inline)]
pub use error::{Error, Result};
