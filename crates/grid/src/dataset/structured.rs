// crate modules
use crate::dataset::{bounds_of, centroid, Dataset};
use crate::error::{Error, Result};
use crate::{Attributes, Extent};

/// A curvilinear grid with explicit node positions
///
/// Topologically regular like a [RectilinearGrid](crate::RectilinearGrid),
/// but every node has its own position. Rotated ws3dinv meshes end up here.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredGrid {
    dims: Extent,
    points: Vec<[f64; 3]>,
    attributes: Attributes,
}

impl StructuredGrid {
    /// Build from node counts and positions with x varying fastest
    pub fn new(dims: Extent, points: Vec<[f64; 3]>) -> Result<Self> {
        if points.len() != dims.product() {
            return Err(Error::ShapeMismatch {
                expected: dims.product(),
                found: points.len(),
            });
        }

        Ok(Self {
            dims,
            points,
            attributes: Attributes::default(),
        })
    }

    /// Number of nodes along each axis
    pub fn dims(&self) -> Extent {
        self.dims
    }

    pub fn cell_dims(&self) -> Extent {
        self.dims.cells_from_points()
    }

    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    fn node(&self, i: usize, j: usize, k: usize) -> [f64; 3] {
        self.points[i + self.dims[0] * (j + self.dims[1] * k)]
    }
}

impl Dataset for StructuredGrid {
    fn n_points(&self) -> usize {
        self.points.len()
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
        bounds_of(self.points.iter().copied())
    }

    fn cell_centers(&self) -> Vec<[f64; 3]> {
        let cells = self.cell_dims();
        // corner offsets collapse on flat axes
        let step = [0, 1, 2].map(|a| usize::from(self.dims[a] > 1));
        let mut centers = Vec::with_capacity(cells.product());
        for k in 0..cells[2] {
            for j in 0..cells[1] {
                for i in 0..cells[0] {
                    let mut corners = Vec::with_capacity(8);
                    for dk in [0, step[2]] {
                        for dj in [0, step[1]] {
                            for di in [0, step[0]] {
                                corners.push(self.node(i + di, j + dj, k + dk));
                            }
                        }
                    }
                    centers.push(centroid(&corners));
                }
            }
        }
        centers
    }
}

#[cfg(test)]
mod structured_tests {
    use super::*;

    fn unit_cube() -> StructuredGrid {
        let mut points = Vec::new();
        for z in [0.0, 1.0] {
            for y in [0.0, 1.0] {
                for x in [0.0, 1.0] {
                    points.push([x, y, z]);
                }
            }
        }
        StructuredGrid::new(Extent::new(2, 2, 2), points).unwrap()
    }

    #[test]
    fn wrong_point_count() {
        assert!(StructuredGrid::new(Extent::new(2, 2, 2), vec![[0.0; 3]; 7]).is_err());
    }

    #[test]
    fn centre_of_cube() {
        let grid = unit_cube();
        assert_eq!(grid.n_cells(), 1);
        assert_eq!(grid.cell_centers(), vec![[0.5, 0.5, 0.5]]);
        assert_eq!(grid.bounds(), Some([0.0, 1.0, 0.0, 1.0, 0.0, 1.0]));
    }
}
