//! File series, time steps and the algorithm interface
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod algorithm;
mod error;
mod guard;
mod selection;
mod series;

#[doc(inline)]
pub use algorithm::{Algorithm, Information};

#[doc(inline)]
pub use guard::{ExtentGuard, TitlesGuard};

#[doc(inline)]
pub use selection::DataArraySelection;

#[doc(inline)]
pub use series::TimeSeries;

#[doc(inline)]
pub use error::{Error, Result};
