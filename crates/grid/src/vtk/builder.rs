// crate modules
use crate::vtk::GridToVtk;

// external crates
use vtkio::model::ByteOrder;

/// Builder implementation for [GridToVtk] configuration
///
/// The fields of [GridToVtk] are public for direct use, but chained setters
/// are often more readable. Finish with [build()](GridToVtkBuilder::build).
///
/// ```rust, no_run
/// # use strata_grid::vtk::{write_vtk, GridToVtk, VtkFormat};
/// # use strata_grid::{DataObject, Extent, UniformGrid};
/// # use vtkio::model::ByteOrder;
/// # let grid = UniformGrid::new(Extent::new(2, 2, 2), [0.0; 3], [1.0; 3]).unwrap();
/// let converter = GridToVtk::builder()
///     .byte_order(ByteOrder::LittleEndian)
///     .title("SGeMS grid")
///     .build();
///
/// let vtk = converter.convert(&DataObject::from(grid)).unwrap();
/// write_vtk(vtk, "./output.vtk", VtkFormat::LegacyBinary).unwrap();
/// ```
pub struct GridToVtkBuilder {
    /// Byte ordering as big or little endian
    byte_order: ByteOrder,
    /// Title written in the file header
    title: String,
    /// Include field data arrays
    include_field_data: bool,
}

impl GridToVtkBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [GridToVtk] type
    pub fn build(self) -> GridToVtk {
        GridToVtk {
            byte_order: self.byte_order,
            title: self.title,
            include_field_data: self.include_field_data,
        }
    }

    /// Set the byte ordering
    ///
    /// Defaults to big endian, which every reader understands.
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }

    /// Set the title of the file
    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    /// Write field data arrays as a field attribute of the points
    pub fn include_field_data(mut self, include: bool) -> Self {
        self.include_field_data = include;
        self
    }
}

impl Default for GridToVtkBuilder {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::BigEndian,
            title: "strata output".to_string(),
            include_field_data: true,
        }
    }
}
