//! Voxel cells around scattered points

// crate modules
use crate::error::{Error, Result};

// standard library
use std::collections::HashMap;

// strata modules
use strata_grid::{Dataset, FieldAssociation, NumericArray, PointSet, VoxelGrid};
use strata_series::{Algorithm, Information};
use strata_utils::SliceExt;

// external crates
use log::{debug, warn};

/// Fallback cell size when nothing better can be inferred
pub const SAFE_SPACING: f64 = 10.0;

/// Corner offsets in voxel order, x varying fastest then y then z
const CORNERS: [[f64; 3]; 8] = [
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [0.5, 0.5, 0.5],
];

/// Width of the cells along one axis
#[derive(Debug, Clone, PartialEq)]
pub enum CellSize {
    /// One width for every point
    Constant(f64),
    /// One width per point
    Values(Vec<f64>),
    /// Widths taken from a point array of the input
    Array(String),
}

impl From<f64> for CellSize {
    fn from(size: f64) -> Self {
        Self::Constant(size)
    }
}

impl From<Vec<f64>> for CellSize {
    fn from(sizes: Vec<f64>) -> Self {
        Self::Values(sizes)
    }
}

/// Builds one voxel cell around every input point
///
/// Each point becomes the centre of a voxel with the cell widths along each
/// axis. Corners shared between neighbouring voxels are merged when they are
/// exactly equal, so callers wanting a tolerance should snap their
/// coordinates first. Every point array of the input is attached as cell
/// data, along with a `Voxel ID` array holding the input point index.
///
/// Widths that are not set are inferred from the mean step between the
/// sorted unique coordinates of that axis. A flat axis borrows the width of
/// the next axis that is not flat (x from y, y from z, z from x), and falls
/// back to the safe spacing when every axis is flat.
///
/// ```rust
/// # use strata_filters::VoxelizePoints;
/// # use strata_grid::{Dataset, PointSet};
/// let points = PointSet::new(vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [4.0, 0.0, 0.0]]);
/// let voxels = VoxelizePoints::new().voxelize(&points).unwrap();
///
/// assert_eq!(voxels.n_cells(), 3);
/// // neighbouring voxels share a face
/// assert_eq!(voxels.n_points(), 16);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelizePoints {
    sizes: [Option<CellSize>; 3],
    estimate: bool,
    safe: f64,
}

impl Default for VoxelizePoints {
    fn default() -> Self {
        Self {
            sizes: [None, None, None],
            estimate: true,
            safe: SAFE_SPACING,
        }
    }
}

impl VoxelizePoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_dx<S: Into<CellSize>>(&mut self, size: S) {
        self.sizes[0] = Some(size.into());
    }

    pub fn set_dy<S: Into<CellSize>>(&mut self, size: S) {
        self.sizes[1] = Some(size.into());
    }

    pub fn set_dz<S: Into<CellSize>>(&mut self, size: S) {
        self.sizes[2] = Some(size.into());
    }

    /// Set the same constant width on every axis
    pub fn set_deltas(&mut self, size: f64) {
        self.sizes = [0, 1, 2].map(|_| Some(CellSize::Constant(size)));
    }

    /// Go back to inferring every width
    pub fn clear_deltas(&mut self) {
        self.sizes = [None, None, None];
    }

    /// Infer missing widths from the point spacing, on by default
    pub fn set_estimate_grid(&mut self, flag: bool) {
        self.estimate = flag;
    }

    pub fn set_safe_size(&mut self, size: f64) {
        self.safe = size;
    }

    pub fn safe_size(&self) -> f64 {
        self.safe
    }

    /// Inferred width per axis, `None` when the axis is flat
    fn estimate_axis(coords: &[f64]) -> Option<f64> {
        coords.sorted_unique().mean_step()
    }

    /// Constant widths for every axis that is not set
    pub fn estimate_spacing(&self, points: &[[f64; 3]]) -> [f64; 3] {
        let estimates = [0, 1, 2].map(|a| match self.estimate && points.len() > 1 {
            true => {
                let coords: Vec<f64> = points.iter().map(|p| p[a]).collect();
                Self::estimate_axis(&coords)
            }
            false => None,
        });

        [0, 1, 2].map(|a| {
            if let Some(d) = estimates[a] {
                return d;
            }
            let borrowed = (1..3).map(|i| (a + i) % 3).find_map(|b| {
                estimates[b].or(match &self.sizes[b] {
                    Some(CellSize::Constant(d)) => Some(*d),
                    _ => None,
                })
            });
            match borrowed {
                Some(d) => d,
                None => {
                    warn!("No spacing to infer along axis {a}, using {}", self.safe);
                    self.safe
                }
            }
        })
    }

    /// Resolve every axis to one width per point
    fn resolve_sizes(&self, input: &PointSet) -> Result<[Vec<f64>; 3]> {
        let n = input.n_points();
        let estimated = self.estimate_spacing(input.points());

        let mut resolved = [Vec::new(), Vec::new(), Vec::new()];
        for (a, axis) in ['x', 'y', 'z'].into_iter().enumerate() {
            let sizes = match &self.sizes[a] {
                None => vec![estimated[a]; n],
                Some(CellSize::Constant(d)) => vec![*d; n],
                Some(CellSize::Values(values)) => values.clone(),
                Some(CellSize::Array(name)) => input
                    .point_data()
                    .get(name)
                    .ok_or_else(|| Error::MissingArray(name.clone()))?
                    .to_f64(),
            };
            if sizes.len() != n {
                return Err(Error::SpacingLength {
                    axis,
                    expected: n,
                    found: sizes.len(),
                });
            }
            resolved[a] = sizes;
        }
        Ok(resolved)
    }

    /// Single width per axis if every point shares it
    fn uniform_sizes(sizes: &[Vec<f64>; 3]) -> Option<[f64; 3]> {
        let mut uniform = [0.0; 3];
        for (a, values) in sizes.iter().enumerate() {
            let first = *values.first()?;
            if values.iter().any(|v| *v != first) {
                return None;
            }
            uniform[a] = first;
        }
        Some(uniform)
    }

    pub fn voxelize(&self, input: &PointSet) -> Result<VoxelGrid> {
        let sizes = self.resolve_sizes(input)?;

        let mut nodes = Vec::new();
        let mut lookup: HashMap<[u64; 3], usize> = HashMap::new();
        let mut cells = Vec::with_capacity(input.n_points());

        for (i, centre) in input.points().iter().enumerate() {
            let delta = [sizes[0][i], sizes[1][i], sizes[2][i]];
            let cell = CORNERS.map(|offset| {
                let corner = [0, 1, 2].map(|a| centre[a] + offset[a] * delta[a]);
                // +0.0 folds negative zero into the same key
                let key = corner.map(|c| (c + 0.0).to_bits());
                *lookup.entry(key).or_insert_with(|| {
                    nodes.push(corner);
                    nodes.len() - 1
                })
            });
            cells.push(cell);
        }
        debug!("{} unique corners for {} voxels", nodes.len(), cells.len());

        let n_cells = cells.len();
        let mut output = VoxelGrid::new(nodes, cells)?;

        for array in input.point_data() {
            output.add_array(FieldAssociation::CellData, array.clone())?;
        }
        let ids: Vec<f64> = (0..n_cells).map(|i| i as f64).collect();
        output.add_array(FieldAssociation::CellData, NumericArray::new("Voxel ID", ids)?)?;

        if let Some(uniform) = Self::uniform_sizes(&sizes) {
            let recovered =
                NumericArray::with_components("Recovered Cell Sizes", 3, uniform.to_vec())?;
            output.add_array(FieldAssociation::FieldData, recovered)?;
        }

        Ok(output)
    }
}

impl Algorithm for VoxelizePoints {
    type Input = PointSet;
    type Output = VoxelGrid;
    type Error = Error;

    fn request_information(&mut self) -> Result<Information> {
        Ok(Information::new("voxel grid"))
    }

    fn request_data(&mut self, input: &PointSet, _: Option<f64>) -> Result<VoxelGrid> {
        self.voxelize(input)
    }
}

#[cfg(test)]
mod voxelize_tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn regular_spacing() {
        let points = [[0.0, 0.0, 5.0], [2.0, 0.0, 5.0], [0.0, 3.0, 5.0], [2.0, 3.0, 5.0]];
        let spacing = VoxelizePoints::new().estimate_spacing(&points);
        // z is flat and borrows from x
        assert_eq!(spacing, [2.0, 3.0, 2.0]);
    }

    #[test]
    fn flat_axis_borrows_a_given_width() {
        let points = [[0.0, 0.0, 0.0], [0.0, 0.0, 4.0]];
        let mut filter = VoxelizePoints::new();
        filter.set_dy(7.0);
        assert_eq!(filter.estimate_spacing(&points), [7.0, 4.0, 4.0]);
    }

    #[rstest]
    #[case(vec![[1.0, 2.0, 3.0]])]
    #[case(vec![[1.0, 2.0, 3.0], [1.0, 2.0, 3.0]])]
    fn safe_fallback(#[case] points: Vec<[f64; 3]>) {
        let mut filter = VoxelizePoints::new();
        filter.set_safe_size(2.5);
        assert_eq!(filter.estimate_spacing(&points), [2.5; 3]);
    }

    #[test]
    fn no_estimate_uses_safe() {
        let points = [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];
        let mut filter = VoxelizePoints::new();
        filter.set_estimate_grid(false);
        assert_eq!(filter.estimate_spacing(&points), [SAFE_SPACING; 3]);
    }

    #[test]
    fn per_point_sizes_must_match() {
        let points = PointSet::new(vec![[0.0; 3], [1.0, 0.0, 0.0]]);
        let mut filter = VoxelizePoints::new();
        filter.set_dx(vec![1.0]);
        let err = filter.voxelize(&points).unwrap_err();
        assert!(matches!(err, Error::SpacingLength { axis: 'x', expected: 2, found: 1 }));
    }

    #[test]
    fn sizes_from_an_array() {
        let mut points = PointSet::new(vec![[0.0; 3], [10.0, 0.0, 0.0]]);
        let widths = NumericArray::new("width", vec![2.0, 4.0]).unwrap();
        points.add_array(FieldAssociation::PointData, widths).unwrap();

        let mut filter = VoxelizePoints::new();
        filter.set_dx(CellSize::Array("width".into()));
        filter.set_dy(1.0);
        filter.set_dz(1.0);
        let voxels = filter.voxelize(&points).unwrap();

        assert_eq!(voxels.bounds(), Some([-1.0, 12.0, -0.5, 0.5, -0.5, 0.5]));
        assert!(voxels.cell_data().get("width").is_some());
        assert!(voxels.field_data().get("Recovered Cell Sizes").is_none());

        filter.set_dx(CellSize::Array("missing".into()));
        assert!(matches!(filter.voxelize(&points), Err(Error::MissingArray(_))));
    }
}
