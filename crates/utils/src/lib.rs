//! Extension traits and helpers shared by the strata crates
//!
//! Float slice helpers for coordinate arrays and time steps, such as the
//! finite range of an array or the nearest time step to a requested value,
//! and all-or-nothing file output for the writers.
#![doc = include_str!("../readme.md")]

mod atomic;
mod error;
mod slice_ext;

pub use atomic::write_atomic;
pub use error::{Error, Result};
pub use slice_ext::SliceExt;
