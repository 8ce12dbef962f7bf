//! Result and Error types for strata-filters

/// Type alias for Result<T, filters::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `strata-filters` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    GridError(#[from] strata_grid::Error),

    #[error("unknown corner code {0}, expected 1 to 7")]
    UnknownCorner(u8),

    #[error("{axis} cell sizes are not defined for all points (expected {expected}, found {found})")]
    SpacingLength {
        axis: char,
        expected: usize,
        found: usize,
    },

    #[error("no point array named \"{0}\" to take cell sizes from")]
    MissingArray(String),
}
