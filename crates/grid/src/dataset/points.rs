// crate modules
use crate::dataset::{bounds_of, Dataset};
use crate::Attributes;

/// Scattered points, each one treated as its own vertex cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: Vec<[f64; 3]>,
    attributes: Attributes,
}

impl PointSet {
    pub fn new(points: Vec<[f64; 3]>) -> Self {
        Self {
            points,
            attributes: Attributes::default(),
        }
    }

    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }
}

impl Dataset for PointSet {
    fn n_points(&self) -> usize {
        self.points.len()
    }

    fn n_cells(&self) -> usize {
        self.points.len()
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
        self.points.clone()
    }
}
