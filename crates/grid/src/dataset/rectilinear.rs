// crate modules
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::{Attributes, Extent};

// external crates
use strata_utils::SliceExt;

/// A grid defined by three independent node coordinate vectors
///
/// Tensor meshes land here. Coordinates must be strictly monotonic along
/// each axis, and readers store them increasing in the world-up frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RectilinearGrid {
    coords: [Vec<f64>; 3],
    attributes: Attributes,
}

impl RectilinearGrid {
    pub fn new(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Result<Self> {
        for (axis, c) in ['x', 'y', 'z'].iter().zip([&x, &y, &z]) {
            if !c.is_strictly_increasing() && !c.is_strictly_decreasing() {
                return Err(Error::NonMonotonicCoordinates { axis: *axis });
            }
        }

        Ok(Self {
            coords: [x, y, z],
            attributes: Attributes::default(),
        })
    }

    pub fn x(&self) -> &[f64] {
        &self.coords[0]
    }

    pub fn y(&self) -> &[f64] {
        &self.coords[1]
    }

    pub fn z(&self) -> &[f64] {
        &self.coords[2]
    }

    pub fn coordinates(&self, axis: usize) -> &[f64] {
        &self.coords[axis]
    }

    /// Number of nodes along each axis
    pub fn dims(&self) -> Extent {
        Extent(self.coords.each_ref().map(|c| c.len()))
    }

    /// Number of cells along each axis
    pub fn cell_dims(&self) -> Extent {
        self.dims().cells_from_points()
    }

    /// Midpoints of the cells along one axis
    fn centres(&self, axis: usize) -> Vec<f64> {
        let c = &self.coords[axis];
        if c.len() == 1 {
            return c.clone();
        }
        c.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }
}

impl Dataset for RectilinearGrid {
    fn n_points(&self) -> usize {
        self.dims().product()
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
        let mut b = [0.0; 6];
        for axis in 0..3 {
            let (lo, hi) = self.coords[axis].finite_range()?;
            b[2 * axis] = lo;
            b[2 * axis + 1] = hi;
        }
        Some(b)
    }

    fn cell_centers(&self) -> Vec<[f64; 3]> {
        let [cx, cy, cz] = [0, 1, 2].map(|a| self.centres(a));
        let mut centers = Vec::with_capacity(cx.len() * cy.len() * cz.len());
        for z in &cz {
            for y in &cy {
                for x in &cx {
                    centers.push([*x, *y, *z]);
                }
            }
        }
        centers
    }
}

#[cfg(test)]
mod rectilinear_tests {
    use super::*;

    #[test]
    fn monotonic_coordinates() {
        assert!(RectilinearGrid::new(vec![0.0, 1.0], vec![0.0], vec![3.0, 2.0, 0.0]).is_ok());
        assert!(RectilinearGrid::new(vec![0.0, 1.0, 0.5], vec![0.0], vec![0.0]).is_err());
    }

    #[test]
    fn counts() {
        let grid = RectilinearGrid::new(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![0.0, 1.0, 2.0, 3.0, 4.0],
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
        )
        .unwrap();
        assert_eq!(grid.n_cells(), 60);
        assert_eq!(grid.n_points(), 120);
        assert_eq!(grid.cell_centers()[1], [1.5, 0.5, 0.5]);
    }

    #[test]
    fn flat_axis() {
        let grid = RectilinearGrid::new(vec![0.0, 1.0, 3.0], vec![0.0], vec![-2.0, 0.0]).unwrap();
        assert_eq!(grid.n_cells(), 2);
        assert_eq!(grid.cell_centers(), vec![[0.5, 0.0, -1.0], [2.0, 0.0, -1.0]]);
        assert_eq!(grid.bounds(), Some([0.0, 3.0, 0.0, 0.0, -2.0, 0.0]));
    }
}
