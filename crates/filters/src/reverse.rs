// crate modules
use crate::error::Result;

// strata modules
use strata_grid::{flip_index, Dataset, Extent, FieldAssociation, UniformGrid};
use strata_series::{Algorithm, Information};

// external crates
use log::trace;

/// Reverses the arrays of a uniform grid along any of its axes
///
/// The geometry is untouched. Point arrays are flipped over the point
/// dimensions and cell arrays over the cell dimensions. Field arrays are
/// copied as they are.
///
/// ```rust
/// # use strata_filters::ReverseImageDataAxii;
/// # use strata_grid::*;
/// let mut grid = build_uniform(Extent::new(3, 2, 1), [0.0; 3], [1.0; 3]).unwrap();
/// let values = NumericArray::new("v", vec![0, 1, 2, 3, 4, 5]).unwrap();
/// grid.add_array(FieldAssociation::PointData, values).unwrap();
///
/// let mut filter = ReverseImageDataAxii::new([false; 3]);
/// filter.set_flip_x(true);
///
/// let flipped = filter.reverse(&grid).unwrap();
/// let values = flipped.point_data().get("v").unwrap();
/// assert_eq!(values.data(), &ArrayData::I32(vec![2, 1, 0, 5, 4, 3]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReverseImageDataAxii {
    axes: [bool; 3],
}

impl Default for ReverseImageDataAxii {
    fn default() -> Self {
        Self { axes: [true; 3] }
    }
}

impl ReverseImageDataAxii {
    /// Flags in x, y, z order
    pub fn new(axes: [bool; 3]) -> Self {
        Self { axes }
    }

    pub fn axes(&self) -> [bool; 3] {
        self.axes
    }

    pub fn set_flip_x(&mut self, flag: bool) {
        self.axes[0] = flag;
    }

    pub fn set_flip_y(&mut self, flag: bool) {
        self.axes[1] = flag;
    }

    pub fn set_flip_z(&mut self, flag: bool) {
        self.axes[2] = flag;
    }

    /// Gather index applying every enabled flip over `dims`
    pub fn index(&self, dims: Extent) -> Result<Vec<usize>> {
        let mut index: Vec<usize> = (0..dims.product()).collect();
        for axis in (0..3).filter(|a| self.axes[*a]) {
            let flip = flip_index(dims, axis)?;
            index = flip.into_iter().map(|i| index[i]).collect();
        }
        Ok(index)
    }

    /// A new grid with the same geometry and reversed arrays
    pub fn reverse(&self, grid: &UniformGrid) -> Result<UniformGrid> {
        let mut output = UniformGrid::new(grid.dims(), grid.origin(), grid.spacing())?;

        let point_index = self.index(grid.dims())?;
        let cell_index = self.index(grid.cell_dims())?;

        for array in grid.point_data() {
            trace!("Reversing point array {}", array.name());
            output.add_array(FieldAssociation::PointData, array.reordered(&point_index))?;
        }
        for array in grid.cell_data() {
            trace!("Reversing cell array {}", array.name());
            output.add_array(FieldAssociation::CellData, array.reordered(&cell_index))?;
        }
        for array in grid.field_data() {
            output.add_array(FieldAssociation::FieldData, array.clone())?;
        }

        Ok(output)
    }
}

impl Algorithm for ReverseImageDataAxii {
    type Input = UniformGrid;
    type Output = UniformGrid;
    type Error = crate::Error;

    fn request_information(&mut self) -> Result<Information> {
        Ok(Information::new("uniform grid"))
    }

    fn request_data(&mut self, grid: &UniformGrid, _: Option<f64>) -> Result<UniformGrid> {
        self.reverse(grid)
    }
}

#[cfg(test)]
mod reverse_tests {
    use super::*;

    #[test]
    fn nothing_enabled_is_identity() {
        let filter = ReverseImageDataAxii::new([false; 3]);
        assert_eq!(filter.index(Extent::new(2, 3, 2)).unwrap(), (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn two_flips_cancel() {
        let dims = Extent::new(4, 3, 2);
        let once = ReverseImageDataAxii::new([false, true, false]).index(dims).unwrap();
        let twice: Vec<usize> = once.iter().map(|i| once[*i]).collect();
        assert_eq!(twice, (0..24).collect::<Vec<_>>());
    }

    #[test]
    fn flip_z() {
        let filter = ReverseImageDataAxii::new([false, false, true]);
        assert_eq!(filter.index(Extent::new(2, 1, 3)).unwrap(), vec![4, 5, 2, 3, 0, 1]);
    }
}
