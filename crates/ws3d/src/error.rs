//! Result and Error types for strata-ws3d

/// Type alias for Result<T, ws3d::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `strata-ws3d` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    ParseError(#[from] strata_parse::Error),

    #[error(transparent)]
    GridError(#[from] strata_grid::Error),

    #[error(transparent)]
    SeriesError(#[from] strata_series::Error),

    #[error("file ended early, expected {0}")]
    MissingValues(&'static str),

    #[error("invalid cell counts \"{0}\", expected \"ny nx nz 0\"")]
    InvalidCounts(String),

    #[error("expected {expected} {axis} cell widths, found {found}")]
    WidthCountMismatch {
        axis: &'static str,
        expected: usize,
        found: usize,
    },
}
