//! Conversion of output objects to VTK formats for plotting
//!
//! Any [DataObject](crate::DataObject) holding a dataset converts to a
//! `vtkio` model with [object_to_vtk()], or through a configured
//! [GridToVtk] converter. The result is written with [write_vtk()].
//!
//! | Object            | VTK dataset                     |
//! | ----------------- | ------------------------------- |
//! | UniformGrid       | ImageData                       |
//! | RectilinearGrid   | RectilinearGrid                 |
//! | StructuredGrid    | StructuredGrid                  |
//! | VoxelGrid         | UnstructuredGrid of voxel cells |
//! | PointSet          | PolyData of vertices            |

mod builder;
mod convert;

#[doc(inline)]
pub use builder::GridToVtkBuilder;

#[doc(inline)]
pub use convert::GridToVtk;

// crate modules
use crate::error::Result;
use crate::DataObject;

// standard library
use std::path::Path;

// external crates
pub use vtkio::model::ByteOrder;
use vtkio::Vtk;

/// Supported VTK output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VtkFormat {
    /// Modern XML formats, the file extension picks the dataset type
    /// (`.vti`, `.vtr`, `.vts`, `.vtu`, `.vtp`)
    Xml,
    /// Legacy ASCII text
    #[default]
    LegacyAscii,
    /// Legacy binary in the byte order of the [Vtk]
    LegacyBinary,
}

/// Convert any dataset object with the default configuration
///
/// Tables and multi-blocks have no VTK dataset equivalent and fail.
///
/// ```rust
/// # use strata_grid::{object_to_vtk, DataObject, Extent, UniformGrid};
/// let grid = UniformGrid::new(Extent::new(2, 2, 2), [0.0; 3], [1.0; 3]).unwrap();
/// let vtk = object_to_vtk(&DataObject::from(grid)).unwrap();
/// ```
pub fn object_to_vtk(object: &DataObject) -> Result<Vtk> {
    GridToVtk::new().convert(object)
}

/// Write a [Vtk] to a file
///
/// ```rust, no_run
/// # use strata_grid::{object_to_vtk, write_vtk, DataObject, Extent, UniformGrid, VtkFormat};
/// let grid = UniformGrid::new(Extent::new(2, 2, 2), [0.0; 3], [1.0; 3]).unwrap();
/// let vtk = object_to_vtk(&DataObject::from(grid)).unwrap();
/// write_vtk(vtk, "grid.vtk", VtkFormat::LegacyAscii).unwrap();
/// ```
pub fn write_vtk<P: AsRef<Path>>(vtk: Vtk, path: P, format: VtkFormat) -> Result<()> {
    let path = path.as_ref();
    match format {
        VtkFormat::Xml => vtk.export(path)?,
        VtkFormat::LegacyAscii => vtk.export_ascii(path)?,
        VtkFormat::LegacyBinary => match vtk.byte_order {
            ByteOrder::LittleEndian => vtk.export_le(path)?,
            _ => vtk.export_be(path)?,
        },
    }
    Ok(())
}
