// crate modules
use crate::dataset::{bounds_of, Dataset};
use crate::error::{Error, Result};
use crate::{Attributes, Extent};

/// A regular grid of equally spaced points
///
/// Sized by its point counts `(nx, ny, nz)`, so there are `nx-1` cells along
/// x and so on. Point and cell values are stored with x varying fastest.
///
/// ```rust
/// # use strata_grid::{Dataset, Extent, UniformGrid};
/// let grid = UniformGrid::new(Extent::new(150, 200, 20), [0.0; 3], [1.0; 3]).unwrap();
/// assert_eq!(grid.n_points(), 600_000);
/// assert_eq!(grid.n_cells(), 563_129);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UniformGrid {
    dims: Extent,
    origin: [f64; 3],
    spacing: [f64; 3],
    attributes: Attributes,
}

impl UniformGrid {
    /// Create an empty grid, spacing must be strictly positive
    pub fn new(dims: Extent, origin: [f64; 3], spacing: [f64; 3]) -> Result<Self> {
        if spacing.iter().any(|s| !(*s > 0.0)) {
            return Err(Error::InvalidSpacing(spacing));
        }

        Ok(Self {
            dims,
            origin,
            spacing,
            attributes: Attributes::default(),
        })
    }

    /// Number of points along each axis
    pub fn dims(&self) -> Extent {
        self.dims
    }

    /// Number of cells along each axis
    pub fn cell_dims(&self) -> Extent {
        self.dims.cells_from_points()
    }

    pub fn origin(&self) -> [f64; 3] {
        self.origin
    }

    pub fn set_origin(&mut self, origin: [f64; 3]) {
        self.origin = origin;
    }

    pub fn spacing(&self) -> [f64; 3] {
        self.spacing
    }

    /// Coordinates of the nodes along a single axis
    pub fn axis_coordinates(&self, axis: usize) -> Vec<f64> {
        (0..self.dims[axis])
            .map(|i| self.origin[axis] + i as f64 * self.spacing[axis])
            .collect()
    }

    /// Position of a point from its flat index
    pub fn point(&self, idx: usize) -> [f64; 3] {
        let [nx, ny, _] = self.dims.as_array();
        let i = idx % nx;
        let j = (idx / nx) % ny;
        let k = idx / (nx * ny);
        [
            self.origin[0] + i as f64 * self.spacing[0],
            self.origin[1] + j as f64 * self.spacing[1],
            self.origin[2] + k as f64 * self.spacing[2],
        ]
    }
}

impl Dataset for UniformGrid {
    fn n_points(&self) -> usize {
        self.dims.product()
    }

    fn n_cells(&self) -> usize {
        self.cell_dims().product()
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    fn bounds(&self) -> Option<[f64; 6]> {
        if self.n_points() == 0 {
            return None;
        }
        let last = self.dims.0.map(|n| n - 1);
        let last = last[0] + self.dims[0] * (last[1] + self.dims[1] * last[2]);
        bounds_of([self.point(0), self.point(last)])
    }

    fn cell_centers(&self) -> Vec<[f64; 3]> {
        let cells = self.cell_dims();
        let mut centers = Vec::with_capacity(cells.product());
        // flat axes put their centre on the single node
        let half = [0, 1, 2].map(|a| {
            if self.dims[a] > 1 {
                0.5 * self.spacing[a]
            } else {
                0.0
            }
        });
        for k in 0..cells[2] {
            for j in 0..cells[1] {
                for i in 0..cells[0] {
                    centers.push([
                        self.origin[0] + i as f64 * self.spacing[0] + half[0],
                        self.origin[1] + j as f64 * self.spacing[1] + half[1],
                        self.origin[2] + k as f64 * self.spacing[2] + half[2],
                    ]);
                }
            }
        }
        centers
    }
}

#[cfg(test)]
mod uniform_tests {
    use super::*;
    use crate::{FieldAssociation, NumericArray};

    #[test]
    fn reject_bad_spacing() {
        assert!(UniformGrid::new(Extent::new(2, 2, 2), [0.0; 3], [1.0, 0.0, 1.0]).is_err());
        assert!(UniformGrid::new(Extent::new(2, 2, 2), [0.0; 3], [1.0, f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn attach_checks_counts() {
        let mut grid = UniformGrid::new(Extent::new(3, 2, 2), [0.0; 3], [1.0; 3]).unwrap();
        let points = NumericArray::new("p", vec![0.0; 12]).unwrap();
        let cells = NumericArray::new("c", vec![0.0; 2]).unwrap();
        let wrong = NumericArray::new("w", vec![0.0; 5]).unwrap();

        assert!(grid.add_array(FieldAssociation::PointData, points).is_ok());
        assert!(grid.add_array(FieldAssociation::CellData, cells).is_ok());
        assert!(grid.add_array(FieldAssociation::CellData, wrong.clone()).is_err());
        assert!(grid.add_array(FieldAssociation::RowData, wrong).is_err());
    }

    #[test]
    fn geometry() {
        let grid = UniformGrid::new(Extent::new(3, 2, 1), [1.0, 2.0, 3.0], [0.5, 1.0, 2.0]).unwrap();
        assert_eq!(grid.point(4), [1.5, 3.0, 3.0]);
        assert_eq!(grid.bounds(), Some([1.0, 2.0, 2.0, 3.0, 3.0, 3.0]));
        assert_eq!(grid.cell_centers(), vec![[1.25, 2.5, 3.0], [1.75, 2.5, 3.0]]);
        assert_eq!(grid.axis_coordinates(0), vec![1.0, 1.5, 2.0]);
    }

    #[test]
    fn empty_grid() {
        let grid = UniformGrid::new(Extent::new(0, 4, 4), [0.0; 3], [1.0; 3]).unwrap();
        assert_eq!(grid.n_points(), 0);
        assert_eq!(grid.n_cells(), 0);
        assert_eq!(grid.bounds(), None);
    }
}
