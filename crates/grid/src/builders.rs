//! Assemble grids from geometry and parsed arrays

// crate modules
use crate::error::{Error, Result};
use crate::{
    AxisConvention, DataObject, Dataset, Extent, FieldAssociation, Layout, NumericArray,
    ParsedFile, ParsedKind, RectilinearGrid, Table, UniformGrid,
};

// external crates
use log::{debug, warn};

/// An empty uniform grid sized by its point counts
pub fn build_uniform(extent: Extent, origin: [f64; 3], spacing: [f64; 3]) -> Result<UniformGrid> {
    UniformGrid::new(extent, origin, spacing)
}

/// An empty rectilinear grid from its node coordinates
pub fn build_rectilinear(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<RectilinearGrid> {
    RectilinearGrid::new(x, y, z)
}

/// Fold every column of a table onto a uniform grid
///
/// Each column is a packed sample cube of `extent` and is attached as point
/// data after the layout transform. The extent, spacing and origin are
/// permuted with the same refold index as the data, so spacing and origin
/// are given in the packed axis order.
///
/// ```rust
/// # use strata_grid::*;
/// let table = Table::from_columns([NumericArray::new("a", vec![0.0; 24]).unwrap()]).unwrap();
/// let layout = Layout::new(MemoryOrder::F, AxisConvention::SEPlib, false);
/// let grid = table_to_grid(&table, Extent::new(4, 3, 2), [1.0, 2.0, 3.0], [0.0; 3], layout).unwrap();
///
/// assert_eq!(grid.dims(), Extent::new(2, 3, 4));
/// assert_eq!(grid.spacing(), [3.0, 2.0, 1.0]);
/// ```
pub fn table_to_grid(
    table: &Table,
    extent: Extent,
    spacing: [f64; 3],
    origin: [f64; 3],
    layout: Layout,
) -> Result<UniformGrid> {
    let dims = layout.output_dims(extent)?;
    let spacing = layout.refold(spacing)?;
    let mut origin = layout.refold(origin)?;

    if dims.product() != table.n_rows() {
        return Err(Error::ShapeMismatch {
            expected: dims.product(),
            found: table.n_rows(),
        });
    }

    // stored with z up, so the origin moves to the deepest node
    if layout.convention == AxisConvention::UbcDepthDown && dims[2] > 0 {
        origin[2] -= (dims[2] - 1) as f64 * spacing[2];
    }

    let mut grid = build_uniform(dims, origin, spacing)?;
    if dims.product() == 0 {
        debug!("Empty extent, no arrays attached");
        return Ok(grid);
    }

    let permutation = layout.permutation(extent)?;
    for column in table.columns() {
        grid.add_array(FieldAssociation::PointData, column.reordered(&permutation))?;
    }

    Ok(grid)
}

/// Attach a model to the cells of a mesh under the given name
///
/// Fails with a cell count mismatch when the model does not have exactly one
/// value per cell.
pub fn place_model_on_mesh<D: Dataset + ?Sized>(
    mesh: &mut D,
    model: NumericArray,
    name: &str,
) -> Result<Option<NumericArray>> {
    let model = if model.name() == name {
        model
    } else {
        model.renamed(name)?
    };
    mesh.add_array(FieldAssociation::CellData, model)
}

/// Attach several named models, stopping at the first that does not fit
pub fn place_models_on_mesh<D, I, S>(mesh: &mut D, models: I) -> Result<()>
where
    D: Dataset + ?Sized,
    I: IntoIterator<Item = (S, NumericArray)>,
    S: AsRef<str>,
{
    for (name, model) in models {
        place_model_on_mesh(mesh, model, name.as_ref())?;
    }
    Ok(())
}

/// Build the object described by a parsed file, consuming it
///
/// Uniform grids receive the columns as point data after the layout
/// transform, rectilinear meshes as cell data, tables keep them as rows.
pub fn build_from_parsed(parsed: ParsedFile) -> Result<DataObject> {
    match parsed.kind {
        ParsedKind::Table => Ok(parsed.into_table()?.into()),
        ParsedKind::UniformGrid => {
            let extent = parsed.extent.ok_or(Error::MissingGeometry("extent"))?;
            let spacing = parsed.spacing.unwrap_or([1.0; 3]);
            let origin = parsed.origin.unwrap_or([0.0; 3]);
            let layout = Layout::new(parsed.memory_order, parsed.convention, false);
            let table = Table::from_columns(parsed.columns)?;
            Ok(table_to_grid(&table, extent, spacing, origin, layout)?.into())
        }
        ParsedKind::Rectilinear => {
            let [x, y, z] = parsed.coords.ok_or(Error::MissingGeometry("coordinates"))?;
            let mut grid = build_rectilinear(x, y, z)?;
            for column in parsed.columns {
                let name = column.name().to_string();
                place_model_on_mesh(&mut grid, column, &name)?;
            }
            Ok(grid.into())
        }
        ParsedKind::Voxel => {
            warn!("Voxel meshes carry their own connectivity and are built by their reader");
            Err(Error::MissingGeometry("voxel connectivity"))
        }
    }
}
