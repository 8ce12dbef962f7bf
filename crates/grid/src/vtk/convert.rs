// standard library
use std::ops::RangeInclusive;

// crate modules
use crate::error::{Error, Result};
use crate::vtk::GridToVtkBuilder;
use crate::{
    ArrayData, DataArrays, DataObject, Dataset, Extent, NumericArray, PointSet, RectilinearGrid,
    StructuredGrid, UniformGrid, VoxelGrid,
};

// external crates
use vtkio::model::{
    Attribute, Attributes, ByteOrder, CellType, Cells, Coordinates, DataArray, DataSet,
    ElementType, Extent as VtkExtent, FieldArray, IOBuffer, ImageDataPiece, Piece,
    PolyDataPiece, RectilinearGridPiece, StructuredGridPiece, UnstructuredGridPiece, Version,
    VertexNumbers, Vtk,
};

/// Convert output objects to vtk formats for plotting
///
/// Point and cell arrays keep their names, element types and component
/// counts. Single component arrays are written as scalars, three component
/// arrays as vectors, anything else as generic arrays.
///
/// ```rust
/// # use strata_grid::vtk::GridToVtk;
/// # use vtkio::model::ByteOrder;
/// // Change the byte ordering to little endian
/// let converter = GridToVtk::builder()
///     .byte_order(ByteOrder::LittleEndian)
///     .build();
/// ```
#[derive(Debug, PartialEq)]
pub struct GridToVtk {
    /// Byte ordering as big or little endian
    pub byte_order: ByteOrder,
    /// Title written in the file header
    pub title: String,
    /// Include field data arrays
    pub include_field_data: bool,
}

// Public API
impl GridToVtk {
    /// Start with the default configuration
    pub fn new() -> GridToVtk {
        Default::default()
    }

    /// Get an instance of the [GridToVtkBuilder]
    pub fn builder() -> GridToVtkBuilder {
        GridToVtkBuilder::default()
    }

    /// Convert a [DataObject] to a vtkio::Vtk object
    pub fn convert(&self, object: &DataObject) -> Result<Vtk> {
        let data = match object {
            DataObject::Uniform(grid) => self.image_data(grid),
            DataObject::Rectilinear(grid) => self.rectilinear(grid),
            DataObject::Structured(grid) => self.structured(grid),
            DataObject::Voxel(grid) => self.unstructured(grid),
            DataObject::Points(points) => self.poly_data(points),
            other => return Err(Error::NotConvertible(other.kind())),
        };

        Ok(Vtk {
            version: Version::Auto,
            title: self.title.clone(),
            byte_order: self.byte_order,
            file_path: None,
            data,
        })
    }
}

impl Default for GridToVtk {
    fn default() -> Self {
        GridToVtkBuilder::default().build()
    }
}

/// Dataset specific conversions
impl GridToVtk {
    fn image_data(&self, grid: &UniformGrid) -> DataSet {
        let extent = Self::extent(grid.dims());
        DataSet::ImageData {
            extent: extent.clone(),
            origin: grid.origin().map(|v| v as f32),
            spacing: grid.spacing().map(|v| v as f32),
            meta: None,
            pieces: vec![Piece::Inline(Box::new(ImageDataPiece {
                extent,
                data: self.collect_attributes(grid),
            }))],
        }
    }

    fn rectilinear(&self, grid: &RectilinearGrid) -> DataSet {
        DataSet::inline(RectilinearGridPiece {
            extent: Self::extent(grid.dims()),
            coords: Coordinates {
                x: IOBuffer::F64(grid.x().to_vec()),
                y: IOBuffer::F64(grid.y().to_vec()),
                z: IOBuffer::F64(grid.z().to_vec()),
            },
            data: self.collect_attributes(grid),
        })
    }

    fn structured(&self, grid: &StructuredGrid) -> DataSet {
        DataSet::inline(StructuredGridPiece {
            extent: Self::extent(grid.dims()),
            points: Self::flatten_points(grid.points()),
            data: self.collect_attributes(grid),
        })
    }

    fn unstructured(&self, grid: &VoxelGrid) -> DataSet {
        let connectivity = grid
            .cells()
            .iter()
            .flat_map(|c| c.iter().map(|p| *p as u64))
            .collect::<Vec<u64>>();
        let offsets = (1..=grid.n_cells() as u64).map(|i| 8 * i).collect();

        DataSet::inline(UnstructuredGridPiece {
            points: Self::flatten_points(grid.points()),
            cells: Cells {
                cell_verts: VertexNumbers::XML {
                    connectivity,
                    offsets,
                },
                types: vec![CellType::Voxel; grid.n_cells()],
            },
            data: self.collect_attributes(grid),
        })
    }

    fn poly_data(&self, points: &PointSet) -> DataSet {
        let n = points.n_points() as u64;
        DataSet::inline(PolyDataPiece {
            points: Self::flatten_points(points.points()),
            verts: Some(VertexNumbers::XML {
                connectivity: (0..n).collect(),
                offsets: (1..=n).collect(),
            }),
            lines: None,
            polys: None,
            strips: None,
            data: self.collect_attributes(points),
        })
    }
}

/// Common use implementations
impl GridToVtk {
    /// Index ranges of a grid with these node counts
    fn extent(dims: Extent) -> VtkExtent {
        let whole = dims.whole_extent();
        VtkExtent::Ranges([
            RangeInclusive::new(whole[0], whole[1]),
            RangeInclusive::new(whole[2], whole[3]),
            RangeInclusive::new(whole[4], whole[5]),
        ])
    }

    fn flatten_points(points: &[[f64; 3]]) -> IOBuffer {
        IOBuffer::F64(points.iter().flatten().copied().collect())
    }

    fn collect_attributes<D: Dataset>(&self, dataset: &D) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.point = dataset.point_data().iter().map(Self::data_array).collect();
        attributes.cell = dataset.cell_data().iter().map(Self::data_array).collect();

        if self.include_field_data && !dataset.field_data().is_empty() {
            attributes.point.push(Self::field_attribute(dataset.field_data()));
        }

        attributes
    }

    fn data_array(array: &NumericArray) -> Attribute {
        let elem = match (array.components(), array.data()) {
            (_, ArrayData::Char(_)) => ElementType::Generic(array.components() as u32),
            (1, _) => ElementType::Scalars {
                num_comp: 1,
                lookup_table: None,
            },
            (3, _) => ElementType::Vectors,
            (n, _) => ElementType::Generic(n as u32),
        };

        Attribute::DataArray(DataArray {
            name: array.name().to_string(),
            elem,
            data: Self::buffer(array.data()),
        })
    }

    fn field_attribute(arrays: &DataArrays) -> Attribute {
        Attribute::Field {
            name: "FieldData".to_string(),
            data_array: arrays
                .iter()
                .map(|a| FieldArray {
                    name: a.name().to_string(),
                    elem: a.components() as u32,
                    data: Self::buffer(a.data()),
                })
                .collect(),
        }
    }

    fn buffer(data: &ArrayData) -> IOBuffer {
        match data {
            ArrayData::I32(v) => IOBuffer::I32(v.clone()),
            ArrayData::U32(v) => IOBuffer::U32(v.clone()),
            ArrayData::I64(v) => IOBuffer::I64(v.clone()),
            ArrayData::U64(v) => IOBuffer::U64(v.clone()),
            ArrayData::F32(v) => IOBuffer::F32(v.clone()),
            ArrayData::F64(v) => IOBuffer::F64(v.clone()),
            ArrayData::Char(v) => IOBuffer::U8(v.clone()),
        }
    }
}

#[cfg(test)]
mod convert_tests {
    use super::*;
    use crate::{FieldAssociation, Table};

    #[test]
    fn uniform_to_image_data() {
        let mut grid = UniformGrid::new(Extent::new(3, 2, 1), [1.0, 2.0, 3.0], [0.5; 3]).unwrap();
        grid.add_array(
            FieldAssociation::PointData,
            NumericArray::new("p", vec![0.0; 6]).unwrap(),
        )
        .unwrap();

        let vtk = GridToVtk::new().convert(&grid.into()).unwrap();
        assert_eq!(vtk.byte_order, ByteOrder::BigEndian);
        let DataSet::ImageData {
            origin, pieces, ..
        } = vtk.data
        else {
            panic!("expected image data");
        };
        assert_eq!(origin, [1.0, 2.0, 3.0]);
        assert_eq!(pieces.len(), 1);
    }

    #[test]
    fn voxels_to_unstructured() {
        let points = (0..8)
            .map(|i| [(i & 1) as f64, ((i >> 1) & 1) as f64, (i >> 2) as f64])
            .collect();
        let grid = VoxelGrid::new(points, vec![[0, 1, 2, 3, 4, 5, 6, 7]]).unwrap();

        let vtk = GridToVtk::new().convert(&grid.into()).unwrap();
        let DataSet::UnstructuredGrid { pieces, .. } = vtk.data else {
            panic!("expected an unstructured grid");
        };
        let Piece::Inline(piece) = &pieces[0] else {
            panic!("expected an inline piece");
        };
        assert_eq!(piece.cells.types, vec![CellType::Voxel]);
    }

    #[test]
    fn tables_are_not_datasets() {
        assert!(GridToVtk::new().convert(&Table::new().into()).is_err());
    }
}
