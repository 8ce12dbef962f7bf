//! Result and Error types for strata-ubc

/// Type alias for Result<T, ubc::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `strata-ubc` crate
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

    #[error("unrecognised UBC mesh format, first line \"{0}\"")]
    UBCFormatUnknown(String),

    #[error("no mesh file set")]
    MissingMesh,

    #[error("file ended early, {0}")]
    MissingValues(String),

    #[error("expected {expected} {axis} cell widths, found {found}")]
    WidthCountMismatch {
        axis: char,
        expected: usize,
        found: usize,
    },

    #[error("invalid {what} \"{value}\" on line {line}")]
    InvalidValue {
        what: &'static str,
        value: String,
        line: usize,
    },

    #[error("2D model has {found:?} cells but the mesh has {expected:?}")]
    ModelDimensions {
        expected: [usize; 2],
        found: [usize; 2],
    },

    #[error("observation data improperly formatted, {0}")]
    ObservationFormat(String),

    #[error("failed to initialise progress bar, {0}")]
    ProgressBar(String),

    #[error("models can not be appended to a {0}")]
    NotAMesh(&'static str),
}
