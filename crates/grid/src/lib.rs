//! Arrays, grids and memory layout transforms
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod array;
mod attributes;
mod builders;
mod dataset;
mod error;
mod extent;
mod layout;
mod object;
mod parsed;
mod table;

pub mod vtk;

#[doc(inline)]
pub use array::{ArrayData, ElementType, FieldAssociation, NumericArray};

#[doc(inline)]
pub use attributes::{Attributes, DataArrays};

#[doc(inline)]
pub use builders::{
    build_from_parsed, build_rectilinear, build_uniform, place_model_on_mesh,
    place_models_on_mesh, table_to_grid,
};

#[doc(inline)]
pub use dataset::{Dataset, PointSet, RectilinearGrid, StructuredGrid, UniformGrid, VoxelGrid};

#[doc(inline)]
pub use extent::Extent;

#[doc(inline)]
pub use layout::{flip_axis, flip_index, AxisConvention, Fold, Layout, MemoryOrder};

#[doc(inline)]
pub use object::{DataObject, MultiBlock};

#[doc(inline)]
pub use parsed::{ParsedFile, ParsedKind};

#[doc(inline)]
pub use table::Table;

#[doc(inline)]
pub use vtk::{object_to_vtk, write_vtk, VtkFormat};

#[doc(inline)]
pub use error::{Error, Result};
