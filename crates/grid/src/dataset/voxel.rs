// crate modules
use crate::dataset::{bounds_of, centroid, Dataset};
use crate::error::{Error, Result};
use crate::Attributes;

/// An unstructured grid made only of axis aligned hexahedra
///
/// Corner points are shared between cells. Each cell lists its eight corners
/// in VTK voxel order, i.e. x varies fastest then y then z:
/// `(-,-,-) (+,-,-) (-,+,-) (+,+,-) (-,-,+) (+,-,+) (-,+,+) (+,+,+)`.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    points: Vec<[f64; 3]>,
    cells: Vec<[usize; 8]>,
    attributes: Attributes,
}

impl VoxelGrid {
    pub fn new(points: Vec<[f64; 3]>, cells: Vec<[usize; 8]>) -> Result<Self> {
        let n_points = points.len();
        for (cell, corners) in cells.iter().enumerate() {
            if let Some(point) = corners.iter().find(|p| **p >= n_points) {
                return Err(Error::InvalidConnectivity {
                    cell,
                    point: *point,
                    n_points,
                });
            }
        }

        Ok(Self {
            points,
            cells,
            attributes: Attributes::default(),
        })
    }

    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    pub fn cells(&self) -> &[[usize; 8]] {
        &self.cells
    }
}

impl Dataset for VoxelGrid {
    fn n_points(&self) -> usize {
        self.points.len()
    }

    fn n_cells(&self) -> usize {
        self.cells.len()
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    fn bounds(&self) -> Option<[f64; 6]> {
        bounds_of(self.points.iter().copied())
    }

    fn cell_centers(&self) -> Vec<[f64; 3]> {
        self.cells
            .iter()
            .map(|c| centroid(&c.map(|p| self.points[p])))
            .collect()
    }
}

#[cfg(test)]
mod voxel_tests {
    use super::*;

    #[test]
    fn connectivity_checked() {
        let points = vec![[0.0; 3]; 8];
        assert!(VoxelGrid::new(points.clone(), vec![[0, 1, 2, 3, 4, 5, 6, 7]]).is_ok());
        assert!(VoxelGrid::new(points, vec![[0, 1, 2, 3, 4, 5, 6, 8]]).is_err());
    }
}
