//! Result and Error types for strata-grid

/// Type alias for Result<T, grid::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `strata-grid` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("vtkio error")]
    VtkioError(#[from] vtkio::Error),

    #[error("buffer does not fit the sample cube (expected {expected} values, found {found})")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("model \"{name}\" does not match the mesh cells, expected {expected} actual {found}")]
    CellCountMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("unsupported layout (order {order}, convention {convention}, swap_xy {swap_xy})")]
    ConventionUnsupported {
        order: String,
        convention: String,
        swap_xy: bool,
    },

    #[error("array names must not be empty")]
    EmptyArrayName,

    #[error("{values} values can not be split into tuples of {components} components")]
    ComponentMismatch { values: usize, components: usize },

    #[error("column \"{name}\" has {found} rows but the table has {expected}")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("{axis} coordinates are not strictly monotonic")]
    NonMonotonicCoordinates { axis: char },

    #[error("grid spacing must be strictly positive, found {0:?}")]
    InvalidSpacing([f64; 3]),

    #[error("cell {cell} references point {point} but only {n_points} points exist")]
    InvalidConnectivity {
        cell: usize,
        point: usize,
        n_points: usize,
    },

    #[error("unknown field association code {0}")]
    UnknownFieldAssociation(u8),

    #[error("arrays can not be attached to {0:?} on this object")]
    UnsupportedAssociation(crate::FieldAssociation),

    #[error("unknown memory order \"{0}\"")]
    UnknownOrder(String),

    #[error("axis index {0} is out of range")]
    InvalidAxis(usize),

    #[error("parsed file has no {0} to build a grid from")]
    MissingGeometry(&'static str),

    #[error("a {0} has no VTK dataset equivalent")]
    NotConvertible(&'static str),
}
