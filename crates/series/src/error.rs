//! Result and Error types for strata-series

// strata modules
use strata_grid::Extent;

/// Type alias for Result<T, series::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `strata-series` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("grid dimensions vary across the series (expected {expected}, found {found})")]
    GridDimensionsVary { expected: Extent, found: Extent },

    #[error("data array titles vary across the series (expected {expected:?}, found {found:?})")]
    TitlesVary {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("no files have been added to the series")]
    NoFiles,
}
