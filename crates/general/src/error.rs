//! Result and Error types for strata-general

/// Type alias for Result<T, general::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `strata-general` crate
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
    FormatError(#[from] strata_format::Error),

    #[error("failed to write delimited output")]
    CsvError(#[from] csv::Error),

    #[error("points need X, Y and Z columns, found {0} columns")]
    MissingCoordinates(usize),

    #[error("titles expected but the file has no lines")]
    MissingTitles,

    #[error("cannot write cell centres of a {0}")]
    NotADataset(&'static str),
}
