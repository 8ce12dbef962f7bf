// standard library
use std::fmt;
use std::ops::Index;

/// A triple of counts along the three grid axes
///
/// What is being counted depends on context. Uniform grids are sized by their
/// points, rectilinear and tensor meshes by their cells. Use
/// [points_from_cells()](Extent::points_from_cells) and
/// [cells_from_points()](Extent::cells_from_points) to move between the two.
///
/// ```rust
/// # use strata_grid::Extent;
/// let points = Extent::new(150, 200, 20);
/// assert_eq!(points.product(), 600_000);
/// assert_eq!(points.cells_from_points().product(), 149 * 199 * 19);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent(pub [usize; 3]);

impl Extent {
    pub fn new(n1: usize, n2: usize, n3: usize) -> Self {
        Self([n1, n2, n3])
    }

    /// Total number of samples
    pub fn product(&self) -> usize {
        self.0.iter().product()
    }

    /// Reorder the axes, entry `i` of the result is `self[refold[i]]`
    pub fn permute(&self, refold: [usize; 3]) -> Self {
        Self([self.0[refold[0]], self.0[refold[1]], self.0[refold[2]]])
    }

    /// Node counts for a mesh with these cell counts
    pub fn points_from_cells(&self) -> Self {
        Self(self.0.map(|n| n + 1))
    }

    /// Cell counts for a grid with these node counts
    ///
    /// An axis with a single node is flat and does not reduce the cell count,
    /// so a 10x10x1 grid has 81 cells. Any empty axis means no cells at all.
    pub fn cells_from_points(&self) -> Self {
        if self.0.contains(&0) {
            return Self([0; 3]);
        }
        Self(self.0.map(|n| if n > 1 { n - 1 } else { 1 }))
    }

    /// The `[0, n1-1, 0, n2-1, 0, n3-1]` index bounds of a point grid
    pub fn whole_extent(&self) -> [i32; 6] {
        let [n1, n2, n3] = self.0.map(|n| n as i32 - 1);
        [0, n1, 0, n2, 0, n3]
    }

    pub fn as_array(&self) -> [usize; 3] {
        self.0
    }
}

impl Index<usize> for Extent {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<[usize; 3]> for Extent {
    fn from(value: [usize; 3]) -> Self {
        Self(value)
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} x {}", self.0[0], self.0[1], self.0[2])
    }
}
