//! Result and Error types for strata-utils

/// Type alias for `Result<T, utils::Error>`
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for `strata_utils`
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("no values to search")]
    EmptySlice,
}
