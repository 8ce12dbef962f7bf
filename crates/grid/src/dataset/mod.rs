//! Concrete dataset types and the shared [Dataset] interface
//!
//! Every dataset owns its geometry plus an [Attributes] set of point, cell and
//! field arrays. Arrays are attached through
//! [add_array()](Dataset::add_array), which enforces that the tuple count
//! matches the number of points or cells.

mod points;
mod rectilinear;
mod structured;
mod uniform;
mod voxel;

#[doc(inline)]
pub use points::PointSet;

#[doc(inline)]
pub use rectilinear::RectilinearGrid;

#[doc(inline)]
pub use structured::StructuredGrid;

#[doc(inline)]
pub use uniform::UniformGrid;

#[doc(inline)]
pub use voxel::VoxelGrid;

// crate modules
use crate::error::{Error, Result};
use crate::{Attributes, DataArrays, FieldAssociation, NumericArray};

/// Common interface over every dataset type
pub trait Dataset {
    fn n_points(&self) -> usize;

    fn n_cells(&self) -> usize;

    fn attributes(&self) -> &Attributes;

    fn attributes_mut(&mut self) -> &mut Attributes;

    /// `[xmin, xmax, ymin, ymax, zmin, zmax]`, or `None` with no points
    fn bounds(&self) -> Option<[f64; 6]>;

    /// Centre of every cell in cell index order
    fn cell_centers(&self) -> Vec<[f64; 3]>;

    fn point_data(&self) -> &DataArrays {
        &self.attributes().point
    }

    fn cell_data(&self) -> &DataArrays {
        &self.attributes().cell
    }

    fn field_data(&self) -> &DataArrays {
        &self.attributes().field
    }

    /// Attach an array after checking it fits
    ///
    /// Returns the array previously stored under the same name, if any.
    fn add_array(
        &mut self,
        association: FieldAssociation,
        array: NumericArray,
    ) -> Result<Option<NumericArray>> {
        match association {
            FieldAssociation::PointData => {
                if array.len() != self.n_points() {
                    return Err(Error::ShapeMismatch {
                        expected: self.n_points(),
                        found: array.len(),
                    });
                }
                Ok(self.attributes_mut().point.insert(array))
            }
            FieldAssociation::CellData => {
                if array.len() != self.n_cells() {
                    return Err(Error::CellCountMismatch {
                        name: array.name().to_string(),
                        expected: self.n_cells(),
                        found: array.len(),
                    });
                }
                Ok(self.attributes_mut().cell.insert(array))
            }
            FieldAssociation::FieldData => Ok(self.attributes_mut().field.insert(array)),
            FieldAssociation::RowData => Err(Error::UnsupportedAssociation(association)),
        }
    }
}

/// Axis aligned bounds of a set of points
pub(crate) fn bounds_of<I: IntoIterator<Item = [f64; 3]>>(points: I) -> Option<[f64; 6]> {
    let mut points = points.into_iter();
    let first = points.next()?;
    let mut b = [first[0], first[0], first[1], first[1], first[2], first[2]];
    for p in points {
        for axis in 0..3 {
            b[2 * axis] = b[2 * axis].min(p[axis]);
            b[2 * axis + 1] = b[2 * axis + 1].max(p[axis]);
        }
    }
    Some(b)
}

/// Mean of a set of points
pub(crate) fn centroid(points: &[[f64; 3]]) -> [f64; 3] {
    let n = points.len().max(1) as f64;
    let mut c = [0.0; 3];
    for p in points {
        c[0] += p[0];
        c[1] += p[1];
        c[2] += p[2];
    }
    c.map(|v| v / n)
}
