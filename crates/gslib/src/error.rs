//! Result and Error types for strata-gslib

/// Type alias for Result<T, gslib::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `strata-gslib` crate
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

    #[error(transparent)]
    GeneralError(#[from] strata_general::Error),

    #[error(transparent)]
    FormatError(#[from] strata_format::Error),

    #[error("not in GSLIB format, {0}")]
    NotGSLIB(String),

    #[error("not in SGeMS grid format, no dimensions in header \"{0}\"")]
    NotSGeMSGrid(String),
}
